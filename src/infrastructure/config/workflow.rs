//! Workflow timing configuration.

use std::time::Duration;

use serde::Deserialize;

/// Confirmation polling settings.
///
/// Confirmation watching is bounded: after `confirmation_timeout_secs` the
/// step reports a timeout and keeps the pending hash for a manual re-check.
#[derive(Debug, Clone, Deserialize)]
pub struct WorkflowConfig {
    /// Delay between receipt polls in milliseconds.
    #[serde(default = "default_poll_interval_ms")]
    pub poll_interval_ms: u64,
    /// Maximum time to wait for one confirmation, in seconds.
    #[serde(default = "default_confirmation_timeout_secs")]
    pub confirmation_timeout_secs: u64,
}

const fn default_poll_interval_ms() -> u64 {
    2000
}

const fn default_confirmation_timeout_secs() -> u64 {
    300
}

impl WorkflowConfig {
    #[must_use]
    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }

    #[must_use]
    pub fn confirmation_timeout(&self) -> Duration {
        Duration::from_secs(self.confirmation_timeout_secs)
    }
}

impl Default for WorkflowConfig {
    fn default() -> Self {
        Self {
            poll_interval_ms: default_poll_interval_ms(),
            confirmation_timeout_secs: default_confirmation_timeout_secs(),
        }
    }
}
