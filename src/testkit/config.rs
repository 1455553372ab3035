//! Workflow settings tuned for tests.

use std::time::Duration;

use crate::application::WorkflowSettings;

/// Millisecond polling and a short confirmation timeout, no explorer link.
#[must_use]
pub fn fast_settings() -> WorkflowSettings {
    WorkflowSettings {
        poll_interval: Duration::from_millis(1),
        confirmation_timeout: Duration::from_millis(200),
        ..WorkflowSettings::default()
    }
}
