//! JSON-RPC chain client.
//!
//! [`EvmChainClient`] implements both chain ports against a single RPC
//! endpoint. Reads use a plain provider; writes attach the local signer and
//! return as soon as the node accepts the transaction. Confirmation is left
//! to the workflow's watcher.

use std::str::FromStr;

use alloy_primitives::{Address, TxHash, U256};
use alloy_provider::network::{EthereumWallet, ReceiptResponse};
use alloy_provider::{Provider, ProviderBuilder};
use alloy_signer_local::PrivateKeySigner;
use async_trait::async_trait;
use tracing::{debug, info};

use super::contract::{IMarketFactory, IERC20};
use crate::domain::ReceiptOutcome;
use crate::error::{ConfigError, ExecutionError, Result};
use crate::infrastructure::config::settings::Config;
use crate::port::{ChainReader, ChainWriter, CreateMarketCall};

/// Chain client for an EVM network.
///
/// Without a private key the client is read-only: [`ChainWriter::account`]
/// returns `None` and submissions fail with
/// [`ExecutionError::WalletDisconnected`].
pub struct EvmChainClient {
    rpc_url: url::Url,
    signer: Option<PrivateKeySigner>,
    chain_id: u64,
}

impl EvmChainClient {
    /// Connect to the configured RPC endpoint and read its chain id.
    ///
    /// # Errors
    ///
    /// Returns an error if the RPC URL or private key is invalid, or the
    /// chain id cannot be read.
    pub async fn connect(config: &Config) -> Result<Self> {
        let rpc_url: url::Url =
            config
                .chain
                .rpc_url
                .parse()
                .map_err(|e: url::ParseError| ConfigError::InvalidValue {
                    field: "rpc_url",
                    reason: e.to_string(),
                })?;

        let signer = config
            .wallet
            .signing_key()
            .map(Self::signer_from_key)
            .transpose()?;

        let provider = ProviderBuilder::new().connect_http(rpc_url.clone());
        let chain_id = provider
            .get_chain_id()
            .await
            .map_err(|e| ExecutionError::ReadFailed(format!("Failed to get chain id: {e}")))?;

        info!(
            rpc_url = %rpc_url,
            chain_id,
            account = ?signer.as_ref().map(PrivateKeySigner::address),
            "Connected to chain"
        );

        Ok(Self {
            rpc_url,
            signer,
            chain_id,
        })
    }

    fn signer_from_key(key: &str) -> Result<PrivateKeySigner> {
        PrivateKeySigner::from_str(key.trim()).map_err(|e| {
            ConfigError::InvalidValue {
                field: "WALLET_PRIVATE_KEY",
                reason: e.to_string(),
            }
            .into()
        })
    }

    fn read_provider(&self) -> impl Provider {
        ProviderBuilder::new().connect_http(self.rpc_url.clone())
    }

    fn write_provider(&self) -> Result<impl Provider> {
        let signer = self
            .signer
            .clone()
            .ok_or(ExecutionError::WalletDisconnected)?;
        let wallet = EthereumWallet::from(signer);
        Ok(ProviderBuilder::new()
            .wallet(wallet)
            .connect_http(self.rpc_url.clone()))
    }
}

#[async_trait]
impl ChainReader for EvmChainClient {
    async fn allowance(&self, token: Address, owner: Address, spender: Address) -> Result<U256> {
        let provider = self.read_provider();
        let erc20 = IERC20::new(token, &provider);

        let allowance: U256 = erc20
            .allowance(owner, spender)
            .call()
            .await
            .map_err(|e| ExecutionError::ReadFailed(format!("Failed to get allowance: {e}")))?;

        debug!(token = %token, owner = %owner, spender = %spender, allowance = %allowance, "Read allowance");
        Ok(allowance)
    }

    async fn receipt(&self, hash: TxHash) -> Result<Option<ReceiptOutcome>> {
        let provider = self.read_provider();
        let receipt = provider
            .get_transaction_receipt(hash)
            .await
            .map_err(|e| ExecutionError::ReadFailed(format!("Failed to get receipt: {e}")))?;

        Ok(receipt.map(|receipt| {
            let block_number = receipt.block_number();
            if receipt.status() {
                ReceiptOutcome::Success { block_number }
            } else {
                ReceiptOutcome::Reverted { block_number }
            }
        }))
    }
}

#[async_trait]
impl ChainWriter for EvmChainClient {
    fn account(&self) -> Option<Address> {
        self.signer.as_ref().map(PrivateKeySigner::address)
    }

    fn chain_id(&self) -> u64 {
        self.chain_id
    }

    async fn approve(&self, token: Address, spender: Address, amount: U256) -> Result<TxHash> {
        let provider = self.write_provider()?;
        let erc20 = IERC20::new(token, &provider);

        let pending_tx = erc20
            .approve(spender, amount)
            .send()
            .await
            .map_err(|e| ExecutionError::SubmissionFailed {
                kind: "approve",
                reason: e.to_string(),
            })?;

        let hash = *pending_tx.tx_hash();
        info!(tx_hash = %hash, token = %token, spender = %spender, amount = %amount, "Approval broadcast");
        Ok(hash)
    }

    async fn create_market(&self, call: &CreateMarketCall) -> Result<TxHash> {
        let provider = self.write_provider()?;
        let factory = IMarketFactory::new(call.factory, &provider);

        let pending_tx = factory
            .createMarket(
                call.oracle,
                U256::from(call.trading_deadline),
                U256::from(call.resolve_time),
                call.liquidity_param,
                call.metadata_uri.clone(),
            )
            .send()
            .await
            .map_err(|e| ExecutionError::SubmissionFailed {
                kind: "createMarket",
                reason: e.to_string(),
            })?;

        let hash = *pending_tx.tx_hash();
        info!(tx_hash = %hash, factory = %call.factory, oracle = %call.oracle, "Market creation broadcast");
        Ok(hash)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Anvil's first default account.
    const ANVIL_KEY: &str = "ac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80";

    #[test]
    fn signer_accepts_hex_with_and_without_prefix() {
        let bare = EvmChainClient::signer_from_key(ANVIL_KEY).unwrap();
        let prefixed = EvmChainClient::signer_from_key(&format!("0x{ANVIL_KEY}\n")).unwrap();

        assert_eq!(bare.address(), prefixed.address());
        assert_eq!(
            bare.address(),
            alloy_primitives::address!("f39Fd6e51aad88F6F4ce6aB8827279cffFb92266")
        );
    }

    #[test]
    fn signer_rejects_garbage() {
        let result = EvmChainClient::signer_from_key("not-a-key");
        assert!(matches!(
            result,
            Err(crate::error::Error::Config(ConfigError::InvalidValue {
                field: "WALLET_PRIVATE_KEY",
                ..
            }))
        ));
    }
}
