//! Records exchanged with the off-chain market indexer.

use alloy_primitives::{Address, TxHash};
use serde::{Deserialize, Serialize};

use super::id::IndexedMarketId;
use super::proposal::MarketCreationProposal;

/// Vibe tag the dashboard assigns to user-created markets.
pub const DEFAULT_VIBE: &str = "Community";

/// Body of the indexer POST for a confirmed market creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IndexRequest {
    pub question: String,
    pub description: String,
    pub vibe: String,
    pub trading_deadline: u64,
    pub chain_id: u64,
    pub creator: Address,
    pub tx_hash: TxHash,
    pub metadata_uri: String,
}

impl IndexRequest {
    /// Build the record for `proposal`, created by `creator` in `tx_hash`.
    #[must_use]
    pub fn for_proposal(
        proposal: &MarketCreationProposal,
        creator: Address,
        tx_hash: TxHash,
        vibe: &str,
    ) -> Self {
        Self {
            question: proposal.description.clone(),
            description: proposal.description.clone(),
            vibe: vibe.to_string(),
            trading_deadline: proposal.params.trading_deadline,
            chain_id: proposal.chain_id,
            creator,
            tx_hash,
            metadata_uri: proposal.params.metadata_uri.clone(),
        }
    }
}

/// Market record returned by the indexer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexedMarket {
    pub id: IndexedMarketId,
}
