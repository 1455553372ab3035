//! Indexer API response types.

use serde::Deserialize;

/// Body of a successful index POST: `{ "market": { "_id": "...", ... } }`.
#[derive(Debug, Deserialize)]
pub struct IndexResponse {
    pub market: Option<MarketRecord>,
}

/// Stored market record. Only the id is read; other fields are kept as-is.
#[derive(Debug, Deserialize)]
pub struct MarketRecord {
    #[serde(rename = "_id")]
    pub id: Option<String>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl IndexResponse {
    /// Market id, if the response carries a non-empty one.
    #[must_use]
    pub fn market_id(&self) -> Option<&str> {
        self.market
            .as_ref()
            .and_then(|market| market.id.as_deref())
            .filter(|id| !id.is_empty())
    }
}
