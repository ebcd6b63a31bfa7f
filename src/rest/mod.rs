//! Minimal JSON-over-GET REST client.
//!
//! A call is a base address plus a positional path template:
//!
//! ```no_run
//! use toolbelt::rest::RestClient;
//!
//! # async fn example() -> Result<(), toolbelt::RestError> {
//! let api = RestClient::new("https://api.example.com")?;
//! let item: serde_json::Value = api.get_json("items/{0}", &[&42]).await?;
//! println!("{item}");
//! # Ok(())
//! # }
//! ```
//!
//! There is no retry and no authentication. The status code is logged but
//! not checked: whatever body comes back is parsed as JSON.

mod error;
mod template;

use reqwest::Client;
use serde::de::DeserializeOwned;
use tracing::{debug, instrument, warn};

use crate::download::build_client;
use crate::download::constants::{CONNECT_TIMEOUT_SECS, READ_TIMEOUT_SECS};

pub use error::RestError;
pub use template::{PathArg, expand, join_url};

/// REST client bound to one base address.
#[derive(Debug, Clone)]
pub struct RestClient {
    base_url: String,
    client: Client,
}

impl RestClient {
    /// Creates a client for `base_url` with default timeouts.
    ///
    /// # Errors
    ///
    /// Returns [`RestError::Client`] if the HTTP client cannot be built.
    pub fn new(base_url: impl Into<String>) -> Result<Self, RestError> {
        Self::with_timeouts(base_url, CONNECT_TIMEOUT_SECS, READ_TIMEOUT_SECS)
    }

    /// Creates a client with explicit timeout values in seconds.
    ///
    /// # Errors
    ///
    /// Returns [`RestError::Client`] if the HTTP client cannot be built.
    pub fn with_timeouts(
        base_url: impl Into<String>,
        connect_timeout_secs: u64,
        read_timeout_secs: u64,
    ) -> Result<Self, RestError> {
        let client = build_client(connect_timeout_secs, read_timeout_secs)
            .map_err(|source| RestError::Client { source })?;
        Ok(Self {
            base_url: base_url.into(),
            client,
        })
    }

    /// The base address every call is joined onto.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Builds the full URL for a template and its values.
    ///
    /// # Errors
    ///
    /// Returns [`RestError::Template`] if the template cannot be expanded.
    pub fn url_for(&self, template: &str, args: &[PathArg<'_>]) -> Result<String, RestError> {
        Ok(join_url(&self.base_url, &expand(template, args)?))
    }

    /// Issues a GET for the expanded template and parses the body as JSON.
    ///
    /// # Errors
    ///
    /// - [`RestError::Template`] if the template cannot be expanded
    /// - [`RestError::Request`] on transport failure
    /// - [`RestError::Parse`] if the body is not valid JSON for `T`
    #[instrument(skip(self, args), fields(base = %self.base_url))]
    pub async fn get_json<T>(&self, template: &str, args: &[PathArg<'_>]) -> Result<T, RestError>
    where
        T: DeserializeOwned,
    {
        let url = self.url_for(template, args)?;
        debug!(%url, "GET");

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| RestError::request(&url, e))?;

        let status = response.status();
        if !status.is_success() {
            warn!(%url, status = status.as_u16(), "non-success status, parsing body anyway");
        }

        let body = response
            .text()
            .await
            .map_err(|e| RestError::request(&url, e))?;

        serde_json::from_str(&body).map_err(|e| RestError::parse(&url, e))
    }
}

/// One-shot GET of `base_url` + expanded `template`, parsed as a JSON value.
///
/// # Errors
///
/// See [`RestClient::get_json`].
pub async fn rest_call(
    base_url: &str,
    template: &str,
    args: &[PathArg<'_>],
) -> Result<serde_json::Value, RestError> {
    RestClient::new(base_url)?.get_json(template, args).await
}
