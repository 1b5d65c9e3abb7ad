//! Generative-Language Backend
//!
//! This module provides the pieces the fetcher needs to talk to the Gemini
//! `generateContent` API:
//!
//! - [`Transport`]: the single HTTP seam (one JSON POST, raw status + body back)
//! - [`HttpTransport`]: the reqwest implementation used in production
//! - [`GeminiEndpoint`]: base URL + model, builds the keyed request URL
//! - Wire types for the request body and helpers that read the response JSON
//!
//! # Usage
//!
//! ```ignore
//! use gem3d_core::backend::{GeminiEndpoint, HttpTransport};
//! use gem3d_core::fetcher::ResponseFetcher;
//!
//! let transport = HttpTransport::new(None)?;
//! let fetcher = ResponseFetcher::new(transport, GeminiEndpoint::default());
//! let text = fetcher.fetch_response("Hello!", api_key.as_ref()).await;
//! ```

mod gemini;
mod http;
mod traits;

pub use gemini::{
    extract_answer_text, extract_error_message, Content, GeminiEndpoint, GenerateContentRequest,
    Part, DEFAULT_BASE_URL, DEFAULT_MODEL,
};
pub use http::HttpTransport;
pub use traits::{BackendError, RawResponse, Transport, TransportFault};
