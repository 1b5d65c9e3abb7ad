//! Response Fetcher
//!
//! One prompt in, one displayable string out. The fetcher never fails: every
//! way a submission can go wrong is classified into a [`RequestOutcome`] and
//! then rendered to [`ResponseText`] as the very last step.
//!
//! # Outcomes
//!
//! | Outcome                | Display text                          |
//! |------------------------|---------------------------------------|
//! | `Success(text)`        | `text`                                |
//! | `EmptyResult`          | `No response generated.`              |
//! | `ApiError`             | `API error: <status> - <message>`     |
//! | `TransportError`       | `Error: <message>`                    |
//! | `MisconfiguredClient`  | `API Key not configured.`             |

use std::fmt;

use serde_json::Value;

use crate::backend::{
    extract_answer_text, extract_error_message, GeminiEndpoint, GenerateContentRequest, RawResponse,
    Transport,
};
use crate::config::{ApiKey, API_KEY_ENV};

/// Text shown when no API key is configured
pub const MISSING_KEY_MESSAGE: &str = "API Key not configured.";

/// Text shown when a successful response has no extractable answer
pub const NO_RESPONSE_MESSAGE: &str = "No response generated.";

/// Message used when an error response carries no usable `error.message`
pub const UNKNOWN_ERROR_MESSAGE: &str = "Unknown error";

/// Classified result of one submission
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RequestOutcome {
    /// The answer text
    Success(String),
    /// 2xx with a well-formed body but nothing at the answer path
    EmptyResult,
    /// Non-2xx status
    ApiError {
        /// HTTP status code
        status: u16,
        /// Server-supplied message or [`UNKNOWN_ERROR_MESSAGE`]
        message: String,
    },
    /// No response obtained, or a 2xx body that was not JSON
    TransportError(String),
    /// No API key
    MisconfiguredClient,
}

impl RequestOutcome {
    /// Short label for logs
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Success(_) => "success",
            Self::EmptyResult => "empty_result",
            Self::ApiError { .. } => "api_error",
            Self::TransportError(_) => "transport_error",
            Self::MisconfiguredClient => "misconfigured_client",
        }
    }

    /// Render to the text shown to the user
    #[must_use]
    pub fn into_response_text(self) -> ResponseText {
        let text = match self {
            Self::Success(text) => text,
            Self::EmptyResult => NO_RESPONSE_MESSAGE.to_string(),
            Self::ApiError { status, message } => format!("API error: {status} - {message}"),
            Self::TransportError(message) => format!("Error: {message}"),
            Self::MisconfiguredClient => MISSING_KEY_MESSAGE.to_string(),
        };
        ResponseText(text)
    }
}

/// Final displayable string for a submission
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResponseText(String);

impl ResponseText {
    /// Borrow the text
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Take the text
    #[must_use]
    pub fn into_string(self) -> String {
        self.0
    }
}

impl From<RequestOutcome> for ResponseText {
    fn from(outcome: RequestOutcome) -> Self {
        outcome.into_response_text()
    }
}

impl AsRef<str> for ResponseText {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ResponseText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl PartialEq<&str> for ResponseText {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

/// Classify a received HTTP response
///
/// Error bodies are parsed best-effort; success bodies must be JSON.
#[must_use]
pub fn classify_response(response: &RawResponse) -> RequestOutcome {
    let RawResponse { status, body } = response;
    if !response.is_success() {
        let message = serde_json::from_str::<Value>(body)
            .ok()
            .as_ref()
            .and_then(extract_error_message)
            .unwrap_or(UNKNOWN_ERROR_MESSAGE)
            .to_string();
        return RequestOutcome::ApiError {
            status: *status,
            message,
        };
    }

    match serde_json::from_str::<Value>(body) {
        Ok(data) => extract_answer_text(&data).map_or(RequestOutcome::EmptyResult, |text| {
            RequestOutcome::Success(text.to_string())
        }),
        Err(e) => RequestOutcome::TransportError(e.to_string()),
    }
}

/// Sends prompts to the generative-language API
#[derive(Clone, Debug)]
pub struct ResponseFetcher<T> {
    /// HTTP seam
    transport: T,
    /// Where requests go
    endpoint: GeminiEndpoint,
}

impl<T: Transport> ResponseFetcher<T> {
    /// Create a fetcher
    pub fn new(transport: T, endpoint: GeminiEndpoint) -> Self {
        Self {
            transport,
            endpoint,
        }
    }

    /// The endpoint requests go to
    pub fn endpoint(&self) -> &GeminiEndpoint {
        &self.endpoint
    }

    /// The underlying transport
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Submit `prompt` and classify what happened
    ///
    /// Without a key this returns immediately and touches no transport.
    pub async fn fetch_outcome(&self, prompt: &str, api_key: Option<&ApiKey>) -> RequestOutcome {
        let Some(api_key) = api_key else {
            tracing::error!(
                "Gemini API key not found. Please set {} in the environment.",
                API_KEY_ENV
            );
            return RequestOutcome::MisconfiguredClient;
        };

        let outcome = self.send(prompt, api_key).await;

        match &outcome {
            RequestOutcome::TransportError(message) => {
                tracing::error!(error = %message, "Error fetching Gemini response");
            }
            RequestOutcome::ApiError { status, message } => {
                tracing::warn!(status, message = %message, "Gemini API returned an error");
            }
            other => {
                tracing::debug!(outcome = other.kind(), "Gemini request finished");
            }
        }

        outcome
    }

    /// Submit `prompt` and return the text to display
    pub async fn fetch_response(&self, prompt: &str, api_key: Option<&ApiKey>) -> ResponseText {
        self.fetch_outcome(prompt, api_key).await.into()
    }

    async fn send(&self, prompt: &str, api_key: &ApiKey) -> RequestOutcome {
        let url = match self.endpoint.generate_url(api_key) {
            Ok(url) => url,
            Err(e) => return RequestOutcome::TransportError(e.to_string()),
        };

        let body = match serde_json::to_value(GenerateContentRequest::from_prompt(prompt)) {
            Ok(body) => body,
            Err(e) => return RequestOutcome::TransportError(e.to_string()),
        };

        tracing::debug!(
            transport = self.transport.name(),
            endpoint = %self.endpoint.generate_path(),
            prompt_chars = prompt.chars().count(),
            "Sending prompt"
        );

        match self.transport.post_json(&url, &body).await {
            Ok(response) => classify_response(&response),
            Err(fault) => RequestOutcome::TransportError(fault.to_string()),
        }
    }
}
