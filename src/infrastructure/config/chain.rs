//! Chain RPC configuration.

use serde::Deserialize;

/// RPC endpoint and explorer settings.
#[derive(Debug, Clone, Deserialize)]
pub struct ChainConfig {
    /// JSON-RPC endpoint used for reads and broadcasts.
    #[serde(default = "default_rpc_url")]
    pub rpc_url: String,
    /// Block explorer base URL, e.g. `https://sepolia.basescan.org`.
    #[serde(default = "default_explorer_url")]
    pub explorer_url: Option<String>,
}

fn default_rpc_url() -> String {
    "https://sepolia.base.org".into()
}

fn default_explorer_url() -> Option<String> {
    Some("https://sepolia.basescan.org".into())
}

impl Default for ChainConfig {
    fn default() -> Self {
        Self {
            rpc_url: default_rpc_url(),
            explorer_url: default_explorer_url(),
        }
    }
}
