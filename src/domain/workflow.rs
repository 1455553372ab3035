//! Market creation workflow state.
//!
//! The workflow moves through [`Step`]s in a fixed order:
//!
//! ```text
//! Check ──► Approve ──► Create ──► Indexing ──► Done
//!   │                     ▲
//!   └─────────────────────┘   (allowance already covers the fee)
//! ```
//!
//! [`WorkflowState`] is owned by exactly one workflow instance and is never
//! persisted; an interrupted attempt restarts at [`Step::Check`].

use std::fmt;

use alloy_primitives::{TxHash, U256};
use chrono::{DateTime, Utc};
use serde::Serialize;

use super::allowance::AllowanceState;
use super::id::IndexedMarketId;
use super::transaction::{PendingTransaction, TxKind};

/// User-facing step of a market creation attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Step {
    /// Deciding between Approve and Create from the live allowance.
    Check,
    /// Allowance is below the creation fee.
    Approve,
    /// Allowance covers the fee; ready to create the market.
    Create,
    /// Create transaction submitted; waiting to confirm and index it.
    Indexing,
    /// Terminal.
    Done,
}

impl Step {
    /// Step that follows a fresh allowance read.
    #[must_use]
    pub fn after_allowance(allowance: &AllowanceState, creation_fee: U256) -> Self {
        if allowance.covers(creation_fee) {
            Self::Create
        } else {
            Self::Approve
        }
    }

    #[must_use]
    pub fn is_terminal(self) -> bool {
        self == Self::Done
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Check => "check",
            Self::Approve => "approve",
            Self::Create => "create",
            Self::Indexing => "indexing",
            Self::Done => "done",
        };
        f.write_str(name)
    }
}

/// The most recent failure of a step, kept until the step next succeeds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StepFailure {
    pub step: Step,
    pub reason: String,
    pub at: DateTime<Utc>,
}

impl StepFailure {
    #[must_use]
    pub fn new(step: Step, reason: impl Into<String>) -> Self {
        Self {
            step,
            reason: reason.into(),
            at: Utc::now(),
        }
    }
}

impl fmt::Display for StepFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} failed: {}", self.step, self.reason)
    }
}

/// What a finished workflow exposes to its caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Completion {
    /// Hash of the confirmed `createMarket` transaction.
    pub tx_hash: TxHash,
    /// Indexer identifier, absent when indexing failed.
    pub market_id: Option<IndexedMarketId>,
    /// Block explorer link for `tx_hash`, when an explorer is configured.
    pub explorer_url: Option<String>,
}

/// Mutable state of one workflow instance.
#[derive(Debug, Clone, Serialize)]
pub struct WorkflowState {
    pub step: Step,
    pub allowance: Option<AllowanceState>,
    pub pending_approval: Option<PendingTransaction>,
    pub pending_creation: Option<PendingTransaction>,
    pub approval_hash: Option<TxHash>,
    pub completion: Option<Completion>,
    pub last_error: Option<StepFailure>,
    pub history: Vec<Step>,
}

impl WorkflowState {
    /// Fresh state at [`Step::Check`].
    #[must_use]
    pub fn new() -> Self {
        Self {
            step: Step::Check,
            allowance: None,
            pending_approval: None,
            pending_creation: None,
            approval_hash: None,
            completion: None,
            last_error: None,
            history: vec![Step::Check],
        }
    }

    /// Move to `step`, recording it in the history when it differs.
    ///
    /// Returns true if the step changed.
    pub fn advance(&mut self, step: Step) -> bool {
        if self.step == step {
            return false;
        }
        self.step = step;
        self.history.push(step);
        true
    }

    /// Pending transaction of `kind`, if one is outstanding.
    #[must_use]
    pub fn pending(&self, kind: TxKind) -> Option<&PendingTransaction> {
        match kind {
            TxKind::Approve => self.pending_approval.as_ref(),
            TxKind::CreateMarket => self.pending_creation.as_ref(),
        }
    }

    /// Hash of the create transaction, pending or confirmed.
    #[must_use]
    pub fn creation_hash(&self) -> Option<TxHash> {
        self.pending_creation
            .as_ref()
            .map(|tx| tx.hash)
            .or_else(|| self.completion.as_ref().map(|c| c.tx_hash))
    }
}

impl Default for WorkflowState {
    fn default() -> Self {
        Self::new()
    }
}
