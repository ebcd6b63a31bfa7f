//! Error types for REST calls.

use thiserror::Error;

/// Errors that can occur while expanding, sending or parsing a REST call.
#[derive(Debug, Error)]
pub enum RestError {
    /// The HTTP client could not be constructed.
    #[error("failed to build HTTP client: {source}")]
    Client {
        /// The underlying builder error.
        #[source]
        source: reqwest::Error,
    },

    /// The path template could not be expanded with the given values.
    #[error("bad path template '{template}': {reason}")]
    Template {
        /// The template as given.
        template: String,
        /// What went wrong.
        reason: String,
    },

    /// Transport failure (DNS, connection, TLS, timeout, body read).
    #[error("request to {url} failed: {source}")]
    Request {
        /// The full request URL.
        url: String,
        /// The underlying network error.
        #[source]
        source: reqwest::Error,
    },

    /// The response body is not valid JSON for the requested type.
    #[error("response from {url} is not valid JSON: {source}")]
    Parse {
        /// The full request URL.
        url: String,
        /// The underlying JSON error.
        #[source]
        source: serde_json::Error,
    },
}

impl RestError {
    /// Creates a template error.
    pub fn template(template: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Template {
            template: template.into(),
            reason: reason.into(),
        }
    }

    /// Creates a request error.
    pub fn request(url: impl Into<String>, source: reqwest::Error) -> Self {
        Self::Request {
            url: url.into(),
            source,
        }
    }

    /// Creates a parse error.
    pub fn parse(url: impl Into<String>, source: serde_json::Error) -> Self {
        Self::Parse {
            url: url.into(),
            source,
        }
    }
}
