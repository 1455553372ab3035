//! HTTP client for the market indexer.
//!
//! One POST per confirmed market. Only connection failures are retried: a
//! request that reached the server may already have stored the record, and a
//! second POST would duplicate it.

use std::future::Future;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client as HttpClient;
use tokio::time::sleep;
use tracing::{debug, info, warn};

use super::dto::IndexResponse;
use crate::domain::{IndexRequest, IndexedMarket, IndexedMarketId};
use crate::error::{IndexerError, Result};
use crate::infrastructure::config::indexer::IndexerConfig;
use crate::port::MarketIndexer;

/// Indexer reached over HTTP.
pub struct HttpMarketIndexer {
    http: HttpClient,
    endpoint: String,
    retry_max_attempts: u32,
    retry_backoff_ms: u64,
}

impl HttpMarketIndexer {
    /// Client for `endpoint` with default timeouts and no retries.
    #[must_use]
    pub fn new(endpoint: String) -> Self {
        Self {
            http: HttpClient::new(),
            endpoint,
            retry_max_attempts: 1,
            retry_backoff_ms: 0,
        }
    }

    #[must_use]
    pub fn from_config(config: &IndexerConfig) -> Self {
        let http = HttpClient::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .connect_timeout(Duration::from_millis(config.connect_timeout_ms))
            .build()
            .unwrap_or_else(|err| {
                warn!(error = %err, "Failed to build HTTP client, using defaults");
                HttpClient::new()
            });

        Self {
            http,
            endpoint: config.endpoint.clone(),
            retry_max_attempts: config.retry_max_attempts,
            retry_backoff_ms: config.retry_backoff_ms,
        }
    }

    #[must_use]
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    async fn post_with_retry(&self, body: &IndexRequest) -> Result<reqwest::Response> {
        self.with_retry(|| self.http.post(&self.endpoint).json(body).send())
            .await
    }

    async fn with_retry<F, Fut>(&self, mut send: F) -> Result<reqwest::Response>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = reqwest::Result<reqwest::Response>>,
    {
        let mut attempt = 0;
        let max_attempts = self.retry_max_attempts.max(1);

        loop {
            attempt += 1;
            match send().await {
                Ok(response) => return Ok(response),
                Err(err) => {
                    if attempt >= max_attempts || !Self::should_retry(&err) {
                        return Err(err.into());
                    }
                    self.backoff(attempt, max_attempts, &err).await;
                }
            }
        }
    }

    fn should_retry(err: &reqwest::Error) -> bool {
        err.is_connect()
    }

    async fn backoff(&self, attempt: u32, max_attempts: u32, err: &reqwest::Error) {
        warn!(
            attempt,
            max_attempts,
            error = %err,
            "Indexer request failed, retrying"
        );
        if self.retry_backoff_ms > 0 {
            sleep(Duration::from_millis(self.retry_backoff_ms)).await;
        }
    }
}

#[async_trait]
impl MarketIndexer for HttpMarketIndexer {
    async fn index(&self, request: &IndexRequest) -> Result<IndexedMarket> {
        info!(endpoint = %self.endpoint, tx_hash = %request.tx_hash, "Indexing market");

        let response = self.post_with_retry(request).await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(IndexerError::Rejected {
                status: status.as_u16(),
                body,
            }
            .into());
        }

        let parsed: IndexResponse =
            serde_json::from_str(&body).map_err(|e| IndexerError::Malformed(e.to_string()))?;
        let id = parsed
            .market_id()
            .ok_or_else(|| IndexerError::Malformed("response has no market._id".to_string()))?;

        debug!(market_id = id, "Indexer accepted market");
        Ok(IndexedMarket {
            id: IndexedMarketId::new(id),
        })
    }
}
