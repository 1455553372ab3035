//! Off-chain market indexer over HTTP.

pub mod client;
pub mod dto;

pub use client::HttpMarketIndexer;
