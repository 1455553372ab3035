//! Outbound adapters (driven side).

pub mod indexer;

#[cfg(feature = "evm")]
pub mod evm;
