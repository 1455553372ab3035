//! Chain-agnostic domain types for market creation.

mod allowance;
mod id;
mod index;
mod proposal;
mod transaction;
mod workflow;

pub mod error;

pub use allowance::AllowanceState;
pub use id::{IndexedMarketId, WorkflowId};
pub use index::{IndexRequest, IndexedMarket, DEFAULT_VIBE};
pub use proposal::{MarketCreationProposal, MarketParams, ProposalContracts};
pub use transaction::{ConfirmationStatus, PendingTransaction, ReceiptOutcome, TxKind};
pub use workflow::{Completion, Step, StepFailure, WorkflowState};
