//! Scriptable in-memory chain implementing both chain ports.
//!
//! [`MockChain`] behaves like a tiny ERC-20 + factory deployment:
//!
//! - Writes return distinct hashes immediately (an instant signer).
//! - Receipts stay pending for a configurable number of polls, then succeed.
//! - A successful approve receipt sets the owner's allowance, exactly as the
//!   token contract would.
//!
//! Failure injection covers wallet rejection, reverts, dropped transactions,
//! RPC errors, and stale allowance reads.

use std::collections::{HashMap, HashSet, VecDeque};

use alloy_primitives::{address, Address, TxHash, U256};
use async_trait::async_trait;
use parking_lot::Mutex;

use crate::domain::ReceiptOutcome;
use crate::error::{ExecutionError, Result};
use crate::port::{ChainReader, ChainWriter, CreateMarketCall};

/// Default connected account: `0xabab…abab`.
pub const ACCOUNT: Address = address!("abababababababababababababababababababab");

/// Default chain id, matching [`sample_proposal`](super::proposal::sample_proposal).
pub const CHAIN_ID: u64 = 84532;

/// Deterministic hash whose every byte is `byte`.
#[must_use]
pub fn tx_hash(byte: u8) -> TxHash {
    TxHash::repeat_byte(byte)
}

/// A recorded `approve` call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApproveCall {
    pub token: Address,
    pub spender: Address,
    pub amount: U256,
    pub hash: TxHash,
}

#[derive(Default)]
struct State {
    allowance: U256,
    stale_reads: VecDeque<U256>,
    allowance_reads: u32,
    fail_allowance: Option<String>,
    fail_receipts: Option<String>,
    reject_writes: VecDeque<String>,
    polls: HashMap<TxHash, u32>,
    reverted: HashSet<TxHash>,
    dropped: HashSet<TxHash>,
    approvals: Vec<ApproveCall>,
    markets: Vec<(CreateMarketCall, TxHash)>,
    next_hash: u64,
}

/// In-memory chain for workflow and watcher tests.
pub struct MockChain {
    account: Option<Address>,
    chain_id: u64,
    confirmation_polls: u32,
    state: Mutex<State>,
}

impl MockChain {
    /// Connected at [`ACCOUNT`] on [`CHAIN_ID`], zero allowance, receipts
    /// available on the first poll.
    #[must_use]
    pub fn new() -> Self {
        Self {
            account: Some(ACCOUNT),
            chain_id: CHAIN_ID,
            confirmation_polls: 0,
            state: Mutex::new(State::default()),
        }
    }

    /// Number of polls a receipt stays pending before it is mined.
    #[must_use]
    pub fn with_confirmation_polls(mut self, polls: u32) -> Self {
        self.confirmation_polls = polls;
        self
    }

    #[must_use]
    pub fn with_allowance(self, amount: U256) -> Self {
        self.state.lock().allowance = amount;
        self
    }

    #[must_use]
    pub fn with_account(mut self, account: Option<Address>) -> Self {
        self.account = account;
        self
    }

    #[must_use]
    pub fn with_chain_id(mut self, chain_id: u64) -> Self {
        self.chain_id = chain_id;
        self
    }

    /// Serve `amount` for the next allowance read instead of the real value.
    pub fn stale_allowance_read(&self, amount: U256) {
        self.state.lock().stale_reads.push_back(amount);
    }

    /// Make every allowance read fail until [`Self::heal`].
    pub fn fail_allowance(&self, reason: &str) {
        self.state.lock().fail_allowance = Some(reason.to_string());
    }

    /// Make every receipt lookup fail until [`Self::heal`].
    pub fn fail_receipts(&self, reason: &str) {
        self.state.lock().fail_receipts = Some(reason.to_string());
    }

    /// Clear injected RPC failures.
    pub fn heal(&self) {
        let mut state = self.state.lock();
        state.fail_allowance = None;
        state.fail_receipts = None;
    }

    /// Reject the next write as if the user declined the signature.
    pub fn reject_next_write(&self, reason: &str) {
        self.state.lock().reject_writes.push_back(reason.to_string());
    }

    /// Mine `hash` as reverted.
    pub fn revert(&self, hash: TxHash) {
        self.state.lock().reverted.insert(hash);
    }

    /// Never mine `hash`.
    pub fn drop_transaction(&self, hash: TxHash) {
        self.state.lock().dropped.insert(hash);
    }

    /// Mine a previously dropped `hash` on the next poll.
    pub fn include_transaction(&self, hash: TxHash) {
        self.state.lock().dropped.remove(&hash);
    }

    /// Hash the next write will return.
    #[must_use]
    pub fn next_hash(&self) -> TxHash {
        Self::hash_for(self.state.lock().next_hash + 1)
    }

    #[must_use]
    pub fn allowance_value(&self) -> U256 {
        self.state.lock().allowance
    }

    #[must_use]
    pub fn allowance_reads(&self) -> u32 {
        self.state.lock().allowance_reads
    }

    #[must_use]
    pub fn receipt_polls(&self, hash: TxHash) -> u32 {
        self.state.lock().polls.get(&hash).copied().unwrap_or(0)
    }

    #[must_use]
    pub fn approvals(&self) -> Vec<ApproveCall> {
        self.state.lock().approvals.clone()
    }

    #[must_use]
    pub fn created_markets(&self) -> Vec<CreateMarketCall> {
        self.state
            .lock()
            .markets
            .iter()
            .map(|(call, _)| call.clone())
            .collect()
    }

    fn hash_for(n: u64) -> TxHash {
        TxHash::left_padding_from(&n.to_be_bytes())
    }

    fn submit(&self) -> Result<TxHash> {
        let mut state = self.state.lock();
        if let Some(reason) = state.reject_writes.pop_front() {
            return Err(ExecutionError::SubmissionFailed {
                kind: "mock",
                reason,
            }
            .into());
        }
        state.next_hash += 1;
        Ok(Self::hash_for(state.next_hash))
    }
}

impl Default for MockChain {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ChainReader for MockChain {
    async fn allowance(&self, _token: Address, _owner: Address, _spender: Address) -> Result<U256> {
        let mut state = self.state.lock();
        state.allowance_reads += 1;
        if let Some(reason) = &state.fail_allowance {
            return Err(ExecutionError::ReadFailed(reason.clone()).into());
        }
        if let Some(stale) = state.stale_reads.pop_front() {
            return Ok(stale);
        }
        Ok(state.allowance)
    }

    async fn receipt(&self, hash: TxHash) -> Result<Option<ReceiptOutcome>> {
        let mut guard = self.state.lock();
        let state = &mut *guard;
        if let Some(reason) = &state.fail_receipts {
            return Err(ExecutionError::ReadFailed(reason.clone()).into());
        }

        let polls = {
            let count = state.polls.entry(hash).or_insert(0);
            *count += 1;
            *count
        };
        if polls <= self.confirmation_polls || state.dropped.contains(&hash) {
            return Ok(None);
        }

        let block_number = Some(1000 + u64::from(polls));
        if state.reverted.contains(&hash) {
            return Ok(Some(ReceiptOutcome::Reverted { block_number }));
        }

        let approved = state
            .approvals
            .iter()
            .find(|call| call.hash == hash)
            .map(|call| call.amount);
        if let Some(amount) = approved {
            state.allowance = amount;
        }
        Ok(Some(ReceiptOutcome::Success { block_number }))
    }
}

#[async_trait]
impl ChainWriter for MockChain {
    fn account(&self) -> Option<Address> {
        self.account
    }

    fn chain_id(&self) -> u64 {
        self.chain_id
    }

    async fn approve(&self, token: Address, spender: Address, amount: U256) -> Result<TxHash> {
        let hash = self.submit()?;
        self.state.lock().approvals.push(ApproveCall {
            token,
            spender,
            amount,
            hash,
        });
        Ok(hash)
    }

    async fn create_market(&self, call: &CreateMarketCall) -> Result<TxHash> {
        let hash = self.submit()?;
        self.state.lock().markets.push((call.clone(), hash));
        Ok(hash)
    }
}
