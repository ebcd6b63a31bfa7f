//! HTTP client wrapper for fetching pages.
//!
//! [`HttpClient`] wraps a pooled `reqwest::Client` configured with the
//! tool's User-Agent, gzip decoding and connect/read timeouts.

use std::time::Duration;

use reqwest::Client;
use tracing::{debug, instrument};

use super::constants::{CONNECT_TIMEOUT_SECS, READ_TIMEOUT_SECS};
use super::error::DownloadError;
use crate::user_agent;

/// HTTP client for page downloads.
///
/// Create once and reuse across a batch to take advantage of connection pooling.
///
/// # Example
///
/// ```no_run
/// use toolbelt::download::HttpClient;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let client = HttpClient::new()?;
/// let body = client.fetch_text("https://example.com/").await?;
/// println!("{} bytes", body.len());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: Client,
}

impl HttpClient {
    /// Creates a client with default timeouts (30s connect, 5min read).
    ///
    /// # Errors
    ///
    /// Returns [`DownloadError::Client`] if the TLS backend cannot be initialised.
    pub fn new() -> Result<Self, DownloadError> {
        Self::with_timeouts(CONNECT_TIMEOUT_SECS, READ_TIMEOUT_SECS)
    }

    /// Creates a client with explicit timeout values in seconds.
    ///
    /// # Errors
    ///
    /// Returns [`DownloadError::Client`] if the builder fails.
    pub fn with_timeouts(
        connect_timeout_secs: u64,
        read_timeout_secs: u64,
    ) -> Result<Self, DownloadError> {
        let client = build_client(connect_timeout_secs, read_timeout_secs)
            .map_err(DownloadError::client)?;
        Ok(Self { client })
    }

    /// Returns the underlying `reqwest` client.
    #[must_use]
    pub fn inner(&self) -> &Client {
        &self.client
    }

    /// Fetches `url` and returns the decoded text body.
    ///
    /// # Errors
    ///
    /// - [`DownloadError::Network`] / [`DownloadError::Timeout`] on transport failure
    /// - [`DownloadError::HttpStatus`] if the server answers with a non-success status
    #[instrument(skip(self), fields(url = %url))]
    pub async fn fetch_text(&self, url: &str) -> Result<String, DownloadError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| DownloadError::network(url, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(DownloadError::http_status(url, status.as_u16()));
        }

        let body = response
            .text()
            .await
            .map_err(|e| DownloadError::network(url, e))?;
        debug!(status = status.as_u16(), bytes = body.len(), "fetched page");
        Ok(body)
    }
}

pub(crate) fn build_client(
    connect_timeout_secs: u64,
    read_timeout_secs: u64,
) -> Result<Client, reqwest::Error> {
    Client::builder()
        .connect_timeout(Duration::from_secs(connect_timeout_secs))
        .timeout(Duration::from_secs(read_timeout_secs))
        .gzip(true)
        .user_agent(user_agent::default_user_agent())
        .build()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_http_client_builds_with_defaults() {
        assert!(HttpClient::new().is_ok());
    }

    #[test]
    fn test_http_client_builds_with_custom_timeouts() {
        assert!(HttpClient::with_timeouts(1, 2).is_ok());
    }

    #[tokio::test]
    async fn test_fetch_text_unreachable_host_is_network_error() {
        let client = HttpClient::with_timeouts(1, 2).unwrap();
        // Port 9 (discard) on localhost is closed in test environments
        let err = client.fetch_text("http://127.0.0.1:9/page").await.unwrap_err();
        assert!(matches!(
            err,
            DownloadError::Network { .. } | DownloadError::Timeout { .. }
        ));
    }
}
