//! gem3d Core - Headless logic for "Gemini 3 in 3D"
//!
//! This crate holds everything in gem3d that is worth testing without a
//! terminal: the prompt round-trip to the generative-language API and the
//! state machine of the rotating cube. Surfaces (the ratatui TUI today) only
//! wire events in and draw what comes out.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                       UI Surface (TUI)                       │
//! │   prompt form ── submit ──┐        frame tick / mouse ──┐    │
//! └───────────────────────────┼─────────────────────────────┼────┘
//!                             │                             │
//! ┌───────────────────────────┼─────────────────────────────┼────┐
//! │                      GEM3D CORE                         │    │
//! │  ┌────────────────────────┴─────┐   ┌───────────────────┴──┐ │
//! │  │        ResponseFetcher       │   │    RotationDriver    │ │
//! │  │  outcome ──► ResponseText    │   │  state ──► Projection│ │
//! │  └──────────────┬───────────────┘   └──────────────────────┘ │
//! │                 │ Transport (reqwest)                         │
//! └─────────────────┼────────────────────────────────────────────┘
//!                   ▼
//!        generativelanguage.googleapis.com
//! ```
//!
//! # Module Overview
//!
//! - [`backend`]: Transport trait, reqwest transport, Gemini endpoint and wire types
//! - [`config`]: TOML + environment configuration, API key loading
//! - [`fetcher`]: Prompt submission, outcome classification, display text
//! - [`scene`]: Rotation driver for the rendered cube
//!
//! # No TUI Dependencies
//!
//! This crate has **zero** dependencies on ratatui, crossterm, or any other
//! UI framework.

#![deny(missing_docs)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod backend;
pub mod config;
pub mod fetcher;
pub mod scene;

pub use backend::{
    BackendError, GeminiEndpoint, GenerateContentRequest, HttpTransport, RawResponse, Transport,
    TransportFault,
};
pub use config::{
    default_config_path, load_config, load_config_from_path, ApiKey, ConfigError,
    ConfigOverrides, ConfigSource, Gem3dConfig, Gem3dToml, API_KEY_ENV,
};
pub use fetcher::{classify_response, RequestOutcome, ResponseFetcher, ResponseText};
pub use scene::{InteractionState, Orientation, Projection, RotationDriver, SceneEvent, Tint};
