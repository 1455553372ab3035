//! Outbound ports (driven side): interfaces implemented by outbound adapters.
//!
//! These contracts describe the chain clients and the off-chain indexer the
//! market creation workflow depends on.

pub mod chain;
pub mod indexer;
