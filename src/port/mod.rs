//! Trait definitions (hexagonal ports). Depend only on domain.
//!
//! # Architecture
//!
//! ```text
//!                    ┌─────────────────────────┐
//!                    │      Application        │
//!                    │  (workflow, watcher)    │
//!                    └───────────┬─────────────┘
//!                                │
//!          ┌─────────────────────┼─────────────────────┐
//!          ▼                     ▼                     ▼
//!   ┌─────────────┐       ┌─────────────┐       ┌─────────────┐
//!   │ ChainReader │       │ ChainWriter │       │MarketIndexer│
//!   └─────────────┘       └─────────────┘       └─────────────┘
//! ```

pub mod outbound;

pub use outbound::chain::{ChainReader, ChainWriter, CreateMarketCall};
pub use outbound::indexer::MarketIndexer;
