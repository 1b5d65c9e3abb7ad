//! Gemini Endpoint and Wire Format
//!
//! # Gemini API
//!
//! `POST {base}/v1beta/models/{model}:generateContent?key={API_KEY}`
//!
//! Request body:
//!
//! ```json
//! { "contents": [ { "parts": [ { "text": "<prompt>" } ] } ] }
//! ```
//!
//! A successful response carries the answer at
//! `candidates[0].content.parts[0].text`; an error response may carry
//! `error.message`.

use serde::Serialize;
use serde_json::Value;
use url::Url;

use super::traits::BackendError;
use crate::config::ApiKey;

/// Default API host
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";

/// Default model identifier
pub const DEFAULT_MODEL: &str = "gemini-3-pro";

/// Where `generateContent` requests go
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GeminiEndpoint {
    /// Scheme + host (+ optional path prefix), no trailing slash needed
    base_url: String,
    /// Model identifier, e.g. `gemini-3-pro`
    model: String,
}

impl GeminiEndpoint {
    /// Create an endpoint for a base URL and model
    pub fn new(base_url: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            model: model.into(),
        }
    }

    /// The configured base URL
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// The configured model
    #[must_use]
    pub fn model(&self) -> &str {
        &self.model
    }

    /// URL without the credential, safe to log
    #[must_use]
    pub fn generate_path(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url.trim_end_matches('/'),
            self.model
        )
    }

    /// Full request URL with the API key as the `key` query parameter
    ///
    /// # Errors
    ///
    /// Returns [`BackendError::InvalidUrl`] if base URL and model do not
    /// form a valid URL.
    pub fn generate_url(&self, api_key: &ApiKey) -> Result<Url, BackendError> {
        let raw = self.generate_path();
        Url::parse_with_params(&raw, &[("key", api_key.expose())])
            .map_err(|source| BackendError::InvalidUrl { url: raw, source })
    }
}

impl Default for GeminiEndpoint {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL, DEFAULT_MODEL)
    }
}

/// `generateContent` request body
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct GenerateContentRequest {
    /// Conversation contents (always one entry here)
    pub contents: Vec<Content>,
}

/// One content entry
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Content {
    /// Parts of the content
    pub parts: Vec<Part>,
}

/// A text part
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Part {
    /// The text
    pub text: String,
}

impl GenerateContentRequest {
    /// Single-turn request carrying only the prompt
    pub fn from_prompt(prompt: impl Into<String>) -> Self {
        Self {
            contents: vec![Content {
                parts: vec![Part {
                    text: prompt.into(),
                }],
            }],
        }
    }
}

/// Read `candidates[0].content.parts[0].text`
///
/// Returns `None` if any segment is missing or the text is not a string.
#[must_use]
pub fn extract_answer_text(data: &Value) -> Option<&str> {
    data.get("candidates")
        .and_then(Value::as_array)
        .and_then(|candidates| candidates.first())
        .and_then(|candidate| candidate.get("content"))
        .and_then(|content| content.get("parts"))
        .and_then(Value::as_array)
        .and_then(|parts| parts.first())
        .and_then(|part| part.get("text"))
        .and_then(Value::as_str)
}

/// Read `error.message` if it is a non-empty string
#[must_use]
pub fn extract_error_message(data: &Value) -> Option<&str> {
    data.get("error")
        .and_then(|e| e.get("message"))
        .and_then(Value::as_str)
        .filter(|m| !m.is_empty())
}
