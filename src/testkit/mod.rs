//! Shared test utilities available to both unit and integration tests.
//!
//! Enabled via `#[cfg(test)]` (unit tests) or the `testkit` feature
//! (integration tests).
//!
//! # Modules
//!
//! - [`chain`] - [`MockChain`](chain::MockChain), an in-memory token and
//!   factory implementing both chain ports.
//! - [`indexer`] - [`MockIndexer`](indexer::MockIndexer), a recording indexer.
//! - [`proposal`] - Canonical proposals.
//! - [`config`] - Fast workflow settings.

pub mod chain;
pub mod config;
pub mod indexer;
pub mod proposal;
