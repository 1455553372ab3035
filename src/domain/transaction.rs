//! Submitted transactions and their confirmation status.

use std::fmt;

use alloy_primitives::TxHash;
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Which workflow write produced a transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum TxKind {
    /// ERC-20 `approve(factory, creationFee)`.
    Approve,
    /// Factory `createMarket(...)`.
    CreateMarket,
}

impl fmt::Display for TxKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Approve => write!(f, "approve"),
            Self::CreateMarket => write!(f, "createMarket"),
        }
    }
}

/// A broadcast transaction whose confirmation has not resolved yet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PendingTransaction {
    pub hash: TxHash,
    pub kind: TxKind,
    pub submitted_at: DateTime<Utc>,
}

impl PendingTransaction {
    /// Record a transaction submitted now.
    #[must_use]
    pub fn new(hash: TxHash, kind: TxKind) -> Self {
        Self {
            hash,
            kind,
            submitted_at: Utc::now(),
        }
    }
}

/// Outcome of a mined transaction as reported by its receipt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReceiptOutcome {
    /// Executed successfully.
    Success { block_number: Option<u64> },
    /// Mined but reverted.
    Reverted { block_number: Option<u64> },
}

/// Observable state of a watched transaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum ConfirmationStatus {
    /// Not mined yet.
    Pending,
    /// Mined and successful.
    Confirmed { block_number: Option<u64> },
    /// Reverted, or could not be observed.
    Failed { reason: String },
}

impl ConfirmationStatus {
    /// True once the status can no longer change.
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        !matches!(self, Self::Pending)
    }
}

impl From<ReceiptOutcome> for ConfirmationStatus {
    fn from(outcome: ReceiptOutcome) -> Self {
        match outcome {
            ReceiptOutcome::Success { block_number } => Self::Confirmed { block_number },
            ReceiptOutcome::Reverted { block_number } => Self::Failed {
                reason: match block_number {
                    Some(block) => format!("reverted in block {block}"),
                    None => "reverted".to_string(),
                },
            },
        }
    }
}
