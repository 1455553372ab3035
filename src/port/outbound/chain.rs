//! Chain client ports for ERC-20 allowance reads and workflow writes.
//!
//! The read and write sides are separate traits so a read-only RPC endpoint
//! can serve allowance and receipt lookups while a wallet handles signing.

use alloy_primitives::{Address, TxHash, U256};
use async_trait::async_trait;

use crate::domain::ReceiptOutcome;
use crate::error::Result;

/// Arguments of the factory `createMarket` call, after oracle resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateMarketCall {
    pub factory: Address,
    pub oracle: Address,
    pub trading_deadline: u64,
    pub resolve_time: u64,
    pub liquidity_param: U256,
    pub metadata_uri: String,
}

/// Port for reading on-chain state.
///
/// # Thread Safety
///
/// Implementations must be thread-safe (`Send + Sync`).
#[async_trait]
pub trait ChainReader: Send + Sync {
    /// Read `token.allowance(owner, spender)`.
    ///
    /// # Errors
    ///
    /// Returns an error if the RPC call fails.
    async fn allowance(&self, token: Address, owner: Address, spender: Address) -> Result<U256>;

    /// Look up the receipt of `hash`.
    ///
    /// Returns `None` while the transaction is not mined.
    ///
    /// # Errors
    ///
    /// Returns an error if the RPC call fails.
    async fn receipt(&self, hash: TxHash) -> Result<Option<ReceiptOutcome>>;
}

/// Port for submitting state-changing transactions from the connected wallet.
///
/// Submissions return as soon as the transaction is broadcast; confirmation
/// is observed separately through [`ChainReader::receipt`].
#[async_trait]
pub trait ChainWriter: Send + Sync {
    /// Connected account, or `None` when no wallet is connected.
    fn account(&self) -> Option<Address>;

    /// Chain the wallet signs for.
    fn chain_id(&self) -> u64;

    /// Submit `token.approve(spender, amount)`.
    ///
    /// # Errors
    ///
    /// Returns an error if signing is rejected or the broadcast fails.
    async fn approve(&self, token: Address, spender: Address, amount: U256) -> Result<TxHash>;

    /// Submit `factory.createMarket(...)`.
    ///
    /// # Errors
    ///
    /// Returns an error if signing is rejected or the broadcast fails.
    async fn create_market(&self, call: &CreateMarketCall) -> Result<TxHash>;
}
