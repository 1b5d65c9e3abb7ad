//! Backend Traits
//!
//! The [`Transport`] trait is the only place the fetcher touches the network.
//! Keeping it this narrow lets tests swap in an in-process transport and
//! exercise the whole outcome taxonomy without an HTTP server.

use std::error::Error as _;

use async_trait::async_trait;
use thiserror::Error;
use url::Url;

/// Status and body of an HTTP response, before any interpretation
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RawResponse {
    /// HTTP status code
    pub status: u16,
    /// Response body as text
    pub body: String,
}

impl RawResponse {
    /// Create a raw response
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// Whether the status is in the 2xx range
    #[must_use]
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// A request that never produced a response (connect failure, timeout,
/// unreadable body)
///
/// Displays as the bare underlying message so it can be shown to the user
/// as `Error: <message>`.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
#[error("{0}")]
pub struct TransportFault(String);

impl TransportFault {
    /// Create a fault from a message
    pub fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }

    /// The fault message
    #[must_use]
    pub fn message(&self) -> &str {
        &self.0
    }
}

impl From<reqwest::Error> for TransportFault {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            return Self("timeout".to_string());
        }

        // Without_url keeps the API key out of the message
        let err = err.without_url();
        let mut message = err.to_string();
        let mut cause = err.source();
        while let Some(inner) = cause {
            let text = inner.to_string();
            if !message.ends_with(&text) {
                message.push_str(": ");
                message.push_str(&text);
            }
            cause = inner.source();
        }
        Self(message)
    }
}

/// Errors setting up a backend
#[derive(Debug, Error)]
pub enum BackendError {
    /// The HTTP client could not be constructed
    #[error("Failed to create HTTP client: {0}")]
    ClientBuild(#[source] reqwest::Error),

    /// The configured base URL and model do not form a valid URL
    #[error("Invalid endpoint URL {url}: {source}")]
    InvalidUrl {
        /// The URL that failed to parse (without credentials)
        url: String,
        /// The underlying parse error
        source: url::ParseError,
    },
}

/// HTTP transport used by the fetcher
///
/// Implementations send exactly one request per call and report whatever
/// status came back. Interpreting non-2xx statuses is the caller's job.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Get the transport name (for logs)
    fn name(&self) -> &str;

    /// POST `body` as JSON to `url`
    ///
    /// Returns `Err` only when no response was obtained.
    async fn post_json(
        &self,
        url: &Url,
        body: &serde_json::Value,
    ) -> Result<RawResponse, TransportFault>;
}
