//! EVM chain integration over JSON-RPC.

pub mod client;
pub mod contract;

pub use client::EvmChainClient;
