//! reqwest Transport
//!
//! Production [`Transport`]: one JSON POST per call through a shared
//! `reqwest::Client`. No retries; a timeout only when one is configured.

use std::time::Duration;

use async_trait::async_trait;
use url::Url;

use super::traits::{BackendError, RawResponse, Transport, TransportFault};

/// HTTP transport backed by reqwest
#[derive(Clone, Debug)]
pub struct HttpTransport {
    /// HTTP client
    http_client: reqwest::Client,
}

impl HttpTransport {
    /// Create a transport, optionally with a whole-request timeout
    ///
    /// # Errors
    ///
    /// Returns [`BackendError::ClientBuild`] if the TLS backend cannot be
    /// initialized.
    pub fn new(timeout: Option<Duration>) -> Result<Self, BackendError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let http_client = builder.build().map_err(BackendError::ClientBuild)?;

        tracing::debug!(timeout = ?timeout, "HTTP client ready");

        Ok(Self { http_client })
    }
}

#[async_trait]
impl Transport for HttpTransport {
    fn name(&self) -> &str {
        "reqwest"
    }

    async fn post_json(
        &self,
        url: &Url,
        body: &serde_json::Value,
    ) -> Result<RawResponse, TransportFault> {
        tracing::debug!(path = %url.path(), "POST generateContent");

        let response = self
            .http_client
            .post(url.clone())
            .json(body)
            .send()
            .await?;

        let status = response.status().as_u16();
        let body = response.text().await?;

        tracing::debug!(status, bytes = body.len(), "Response received");

        Ok(RawResponse { status, body })
    }
}
