//! Off-chain indexer HTTP configuration.

use serde::Deserialize;

use crate::domain::DEFAULT_VIBE;

/// Indexer endpoint and HTTP client settings.
#[derive(Debug, Clone, Deserialize)]
pub struct IndexerConfig {
    /// Full URL markets are POSTed to.
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
    /// Request timeout in milliseconds.
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
    /// Connect timeout in milliseconds.
    #[serde(default = "default_connect_timeout_ms")]
    pub connect_timeout_ms: u64,
    /// Maximum attempts when the connection cannot be established.
    #[serde(default = "default_retry_max_attempts")]
    pub retry_max_attempts: u32,
    /// Backoff between attempts in milliseconds.
    #[serde(default = "default_retry_backoff_ms")]
    pub retry_backoff_ms: u64,
    /// Vibe tag sent with every indexed market.
    #[serde(default = "default_vibe")]
    pub vibe: String,
}

fn default_endpoint() -> String {
    "http://localhost:3000/api/bizfun/markets".into()
}

const fn default_timeout_ms() -> u64 {
    10_000
}

const fn default_connect_timeout_ms() -> u64 {
    2000
}

const fn default_retry_max_attempts() -> u32 {
    3
}

const fn default_retry_backoff_ms() -> u64 {
    500
}

fn default_vibe() -> String {
    DEFAULT_VIBE.into()
}

impl Default for IndexerConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            timeout_ms: default_timeout_ms(),
            connect_timeout_ms: default_connect_timeout_ms(),
            retry_max_attempts: default_retry_max_attempts(),
            retry_backoff_ms: default_retry_backoff_ms(),
            vibe: default_vibe(),
        }
    }
}
