//! Infrastructure configuration modules.

pub mod chain;
pub mod indexer;
pub mod logging;
pub mod settings;
pub mod wallet;
pub mod workflow;
