//! HTTP idiom endpoint source.

use std::time::Duration;

use anyhow::Context;
use async_trait::async_trait;
use tracing::instrument;

use chengyu_core::error::SourceError;
use chengyu_core::model::IdiomRecord;
use chengyu_core::parser::IdiomEnvelope;
use chengyu_core::traits::IdiomSource;

const DEFAULT_BASE_URL: &str = "http://localhost:3000";
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Fetches idioms from `GET {base_url}/api/idiom?count=N`.
pub struct HttpIdiomSource {
    base_url: String,
    timeout_secs: u64,
    client: reqwest::Client,
}

impl HttpIdiomSource {
    pub fn new(base_url: &str, timeout_secs: u64) -> anyhow::Result<Self> {
        let base = if base_url.is_empty() {
            DEFAULT_BASE_URL
        } else {
            base_url
        };

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .context("failed to build HTTP client")?;

        Ok(Self {
            base_url: base.trim_end_matches('/').to_string(),
            timeout_secs,
            client,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[async_trait]
impl IdiomSource for HttpIdiomSource {
    fn name(&self) -> &str {
        "http"
    }

    #[instrument(skip(self), fields(base_url = %self.base_url))]
    async fn fetch_idioms(&self, count: usize) -> Result<Vec<IdiomRecord>, SourceError> {
        let count = count.max(1);
        let response = self
            .client
            .get(format!("{}/api/idiom?count={count}", self.base_url))
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    SourceError::Timeout(self.timeout_secs)
                } else if e.is_connect() {
                    SourceError::Network(format!(
                        "idiom endpoint not reachable at {}",
                        self.base_url
                    ))
                } else {
                    SourceError::Network(e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(SourceError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let envelope: IdiomEnvelope = response.json().await.map_err(|e| {
            if e.is_timeout() {
                SourceError::Timeout(self.timeout_secs)
            } else if e.is_decode() {
                SourceError::MalformedRecord(format!("failed to decode idiom envelope: {e}"))
            } else {
                SourceError::Network(format!("failed to read response body: {e}"))
            }
        })?;

        let records = envelope.into_records()?;
        tracing::debug!("received {} idiom(s)", records.len());
        Ok(records)
    }
}
