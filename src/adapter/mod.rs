//! Implementations of ports (hexagonal adapters).
//!
//! - [`outbound`] - chain and indexer clients the workflow drives
//! - [`inbound`] - the `bizfun` command line (requires `evm` feature)

pub mod outbound;

#[cfg(feature = "evm")]
pub mod inbound;
