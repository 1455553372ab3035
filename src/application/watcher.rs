//! Transaction confirmation watching.
//!
//! A [`ConfirmationWatcher`] polls [`ChainReader::receipt`] for one hash at a
//! time. Callers key distinct watches off distinct hashes, so an approve
//! confirmation can never be read as a create confirmation.
//!
//! Watching is bounded by a timeout. On timeout the transaction may still be
//! mined later; callers keep the hash and can watch it again.

use std::sync::Arc;
use std::time::Duration;

use alloy_primitives::TxHash;
use tokio::sync::watch;
use tokio::time::{sleep, timeout_at, Instant};
use tracing::{debug, warn};

use crate::domain::ConfirmationStatus;
use crate::error::{ExecutionError, Result};
use crate::port::ChainReader;

/// Polls receipts until a transaction is mined or the timeout elapses.
#[derive(Clone)]
pub struct ConfirmationWatcher {
    reader: Arc<dyn ChainReader>,
    poll_interval: Duration,
    timeout: Duration,
}

impl ConfirmationWatcher {
    #[must_use]
    pub fn new(reader: Arc<dyn ChainReader>, poll_interval: Duration, timeout: Duration) -> Self {
        Self {
            reader,
            poll_interval,
            timeout,
        }
    }

    /// Read the current status of `hash` once.
    ///
    /// # Errors
    ///
    /// Returns an error if the receipt lookup fails.
    pub async fn poll(&self, hash: TxHash) -> Result<ConfirmationStatus> {
        let receipt = self.reader.receipt(hash).await?;
        Ok(receipt.map_or(ConfirmationStatus::Pending, ConfirmationStatus::from))
    }

    /// Wait until `hash` is mined.
    ///
    /// Returns [`ConfirmationStatus::Confirmed`] or
    /// [`ConfirmationStatus::Failed`]; never `Pending`.
    ///
    /// # Errors
    ///
    /// Returns [`ExecutionError::ConfirmationTimeout`] when the timeout
    /// elapses first, or the receipt lookup error if a poll fails.
    pub async fn wait(&self, hash: TxHash) -> Result<ConfirmationStatus> {
        let polling = async {
            let mut polls: u32 = 0;
            loop {
                polls += 1;
                let status = self.poll(hash).await?;
                if status.is_terminal() {
                    debug!(tx_hash = %hash, polls, "Transaction resolved");
                    return Ok(status);
                }
                sleep(self.poll_interval).await;
            }
        };

        match tokio::time::timeout(self.timeout, polling).await {
            Ok(result) => result,
            Err(_) => {
                warn!(
                    tx_hash = %hash,
                    timeout = ?self.timeout,
                    "Confirmation timed out"
                );
                Err(ExecutionError::ConfirmationTimeout {
                    hash,
                    waited: self.timeout,
                }
                .into())
            }
        }
    }

    /// Watch `hash` in the background.
    ///
    /// The receiver starts at `Pending` and is updated after every poll until
    /// the status is terminal. Lookup errors and timeouts are reported as
    /// `Failed`; a lookup still in flight at the deadline is abandoned.
    #[must_use]
    pub fn spawn(&self, hash: TxHash) -> watch::Receiver<ConfirmationStatus> {
        let (tx, rx) = watch::channel(ConfirmationStatus::Pending);
        let watcher = self.clone();

        tokio::spawn(async move {
            let deadline = Instant::now() + watcher.timeout;
            loop {
                let status = match timeout_at(deadline, watcher.poll(hash)).await {
                    Ok(Ok(status)) => status,
                    Ok(Err(e)) => ConfirmationStatus::Failed {
                        reason: e.to_string(),
                    },
                    Err(_) => {
                        warn!(tx_hash = %hash, timeout = ?watcher.timeout, "Confirmation timed out");
                        tx.send_replace(ConfirmationStatus::Failed {
                            reason: format!("not confirmed after {:?}", watcher.timeout),
                        });
                        break;
                    }
                };
                let terminal = status.is_terminal();
                tx.send_if_modified(|current| {
                    if *current == status {
                        return false;
                    }
                    *current = status;
                    true
                });
                if terminal || tx.is_closed() {
                    break;
                }
                if timeout_at(deadline, sleep(watcher.poll_interval)).await.is_err() {
                    tx.send_replace(ConfirmationStatus::Failed {
                        reason: format!("not confirmed after {:?}", watcher.timeout),
                    });
                    break;
                }
            }
        });

        rx
    }
}
