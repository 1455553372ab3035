//! Off-chain market indexer port.

use async_trait::async_trait;

use crate::domain::{IndexRequest, IndexedMarket};
use crate::error::Result;

/// Port for mirroring a confirmed market creation into the backend.
#[async_trait]
pub trait MarketIndexer: Send + Sync {
    /// Persist `request` and return the stored market.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure, a non-success status, or a
    /// response without a market id.
    async fn index(&self, request: &IndexRequest) -> Result<IndexedMarket>;
}
