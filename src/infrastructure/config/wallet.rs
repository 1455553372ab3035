//! Signing wallet settings.

use serde::Deserialize;

/// Where the workflow's signing key comes from.
///
/// The key itself is never read from the config file: it is taken from
/// `WALLET_PRIVATE_KEY`, or decrypted from `keystore_path` at load time.
/// Without either the chain client runs read-only.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct WalletConfig {
    /// Encrypted JSON keystore, unlocked with `BIZFUN_KEYSTORE_PASSWORD`.
    #[serde(default)]
    pub keystore_path: Option<String>,
    #[serde(skip)]
    pub private_key: Option<String>,
}

impl WalletConfig {
    /// Hex private key resolved at load time, if any.
    #[must_use]
    pub fn signing_key(&self) -> Option<&str> {
        self.private_key
            .as_deref()
            .map(str::trim)
            .filter(|key| !key.is_empty())
    }
}
