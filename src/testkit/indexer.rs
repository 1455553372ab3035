//! Recording mock of the off-chain indexer.

use async_trait::async_trait;
use parking_lot::Mutex;

use crate::domain::{IndexRequest, IndexedMarket, IndexedMarketId};
use crate::error::{IndexerError, Result};
use crate::port::MarketIndexer;

/// Indexer that answers with a fixed market id, or fails on demand.
pub struct MockIndexer {
    market_id: String,
    fail_with: Mutex<Option<String>>,
    requests: Mutex<Vec<IndexRequest>>,
}

impl MockIndexer {
    /// Indexer responding `{ market: { _id: market_id } }`.
    #[must_use]
    pub fn responding(market_id: &str) -> Self {
        Self {
            market_id: market_id.to_string(),
            fail_with: Mutex::new(None),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Indexer whose every request fails with a simulated network error.
    #[must_use]
    pub fn failing(reason: &str) -> Self {
        let indexer = Self::responding("unused");
        *indexer.fail_with.lock() = Some(reason.to_string());
        indexer
    }

    #[must_use]
    pub fn requests(&self) -> Vec<IndexRequest> {
        self.requests.lock().clone()
    }
}

#[async_trait]
impl MarketIndexer for MockIndexer {
    async fn index(&self, request: &IndexRequest) -> Result<IndexedMarket> {
        self.requests.lock().push(request.clone());
        if let Some(reason) = self.fail_with.lock().clone() {
            return Err(IndexerError::Rejected {
                status: 503,
                body: reason,
            }
            .into());
        }
        Ok(IndexedMarket {
            id: IndexedMarketId::new(self.market_id.clone()),
        })
    }
}
