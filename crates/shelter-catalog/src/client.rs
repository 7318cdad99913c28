//! HTTP download of a remote shelter dataset.

use std::time::Duration;

use reqwest::Client;

use crate::error::CatalogError;
use crate::retry::retry_with_backoff;

/// Fetches catalog documents over HTTP.
///
/// Non-2xx responses become [`CatalogError::UnexpectedStatus`]. Transient
/// failures (network errors, 5xx, 429) are retried with exponential back-off
/// up to `max_retries` additional attempts.
pub struct CatalogClient {
    client: Client,
    max_retries: u32,
    backoff_base_ms: u64,
}

impl CatalogClient {
    /// Creates a client with the given per-request timeout and retry policy.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(
        timeout_secs: u64,
        user_agent: &str,
        max_retries: u32,
        backoff_base_ms: u64,
    ) -> Result<Self, CatalogError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;
        Ok(Self {
            client,
            max_retries,
            backoff_base_ms,
        })
    }

    /// Downloads `url` and returns the response body as text.
    ///
    /// # Errors
    ///
    /// - [`CatalogError::UnexpectedStatus`] for a non-2xx status (after
    ///   retries, when the status is transient).
    /// - [`CatalogError::Http`] on network failure after all retries.
    pub async fn fetch_text(&self, url: &str) -> Result<String, CatalogError> {
        retry_with_backoff(self.max_retries, self.backoff_base_ms, || async move {
            let response = self.client.get(url).send().await?;
            let status = response.status();
            if !status.is_success() {
                return Err(CatalogError::UnexpectedStatus {
                    status: status.as_u16(),
                    url: url.to_owned(),
                });
            }
            Ok(response.text().await?)
        })
        .await
    }
}
