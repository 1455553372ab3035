//! Application services (use cases).
//!
//! These services sequence domain logic over the outbound ports. They never
//! talk to a node or an HTTP endpoint directly.

pub mod watcher;
pub mod workflow;

pub use watcher::ConfirmationWatcher;
pub use workflow::{MarketCreationWorkflow, WorkflowDeps, WorkflowSettings};
