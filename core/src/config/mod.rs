//! TOML Configuration File Support
//!
//! Centralized configuration loading for gem3d, supporting a TOML file at
//! `~/.config/gem3d/config.toml`.
//!
//! # Configuration Priority
//!
//! Configuration values are loaded with the following priority (highest first):
//! 1. CLI arguments ([`ConfigOverrides`])
//! 2. Environment variables
//! 3. TOML configuration file
//! 4. Default values
//!
//! The API key is not part of the file. It is read once from the
//! environment with [`ApiKey::from_env`] and handed to each fetch.
//!
//! # Example Configuration
//!
//! ```toml
//! [api]
//! base_url = "https://generativelanguage.googleapis.com"
//! model = "gemini-3-pro"
//! timeout_secs = 30
//!
//! [ui]
//! fps = 30
//! ```

use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::backend::{GeminiEndpoint, DEFAULT_BASE_URL, DEFAULT_MODEL};

/// Primary environment variable holding the API key
pub const API_KEY_ENV: &str = "GEMINI_API_KEY";

/// Fallback environment variable holding the API key
pub const API_KEY_ENV_FALLBACK: &str = "GEM3D_API_KEY";

/// Default frame rate for the surface render loop
pub const DEFAULT_FPS: u32 = 30;

/// Upper bound accepted for `fps`
pub const MAX_FPS: u32 = 120;

// =============================================================================
// Error Types
// =============================================================================

/// Errors that can occur when loading configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read config file
    #[error("Failed to read config file at {path}: {source}")]
    ReadError {
        /// The path that was attempted
        path: PathBuf,
        /// The underlying IO error
        source: std::io::Error,
    },

    /// Failed to parse TOML
    #[error("Failed to parse TOML config: {0}")]
    ParseError(#[from] toml::de::Error),

    /// Invalid configuration value
    #[error("Invalid configuration: {0}")]
    ValidationError(String),
}

// =============================================================================
// API Key
// =============================================================================

/// The generative-language API credential
///
/// `Debug` is redacted so the key never ends up in logs.
#[derive(Clone, PartialEq, Eq)]
pub struct ApiKey(String);

impl ApiKey {
    /// Wrap a key
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    /// Read the key from `GEMINI_API_KEY`, falling back to `GEM3D_API_KEY`
    ///
    /// Unset and empty variables both count as absent.
    #[must_use]
    pub fn from_env() -> Option<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Read the key through an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> Option<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        [API_KEY_ENV, API_KEY_ENV_FALLBACK]
            .into_iter()
            .filter_map(&lookup)
            .map(|value| value.trim().to_string())
            .find(|value| !value.is_empty())
            .map(Self)
    }

    /// The raw key, for building the request URL only
    #[must_use]
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ApiKey(***)")
    }
}

// =============================================================================
// Configuration Source Tracking
// =============================================================================

/// Tracks where a configuration value came from
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConfigSource {
    /// Value from command-line argument
    Cli,
    /// Value from environment variable
    Env,
    /// Value from TOML configuration file
    File,
    /// Default value
    Default,
}

impl fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Cli => write!(f, "CLI"),
            Self::Env => write!(f, "environment"),
            Self::File => write!(f, "config file"),
            Self::Default => write!(f, "default"),
        }
    }
}

// =============================================================================
// TOML Configuration Structures
// =============================================================================

/// API section of the TOML configuration
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiToml {
    /// Base URL of the generative-language service
    pub base_url: Option<String>,

    /// Model identifier
    pub model: Option<String>,

    /// Request timeout in seconds (absent or 0 = no timeout)
    pub timeout_secs: Option<u64>,
}

/// UI section of the TOML configuration
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct UiToml {
    /// Render loop frame rate
    pub fps: Option<u32>,
}

/// Top-level TOML configuration structure
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Gem3dToml {
    /// API configuration section
    pub api: ApiToml,

    /// UI configuration section
    pub ui: UiToml,
}

// =============================================================================
// Main Configuration Struct
// =============================================================================

/// Resolved configuration for gem3d
#[derive(Clone, Debug)]
pub struct Gem3dConfig {
    /// Base URL of the generative-language service
    pub base_url: String,

    /// Model identifier
    pub model: String,

    /// Request timeout (None = wait indefinitely)
    pub timeout: Option<Duration>,

    /// Render loop frame rate
    pub fps: u32,

    /// Path to the config file that was loaded (if any)
    pub config_file_path: Option<PathBuf>,

    /// Source of configuration values
    source: ConfigSource,
}

impl Default for Gem3dConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            timeout: None,
            fps: DEFAULT_FPS,
            config_file_path: None,
            source: ConfigSource::Default,
        }
    }
}

impl Gem3dConfig {
    /// Create a new configuration with default values
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the primary source of this configuration
    #[must_use]
    pub fn source(&self) -> ConfigSource {
        self.source
    }

    /// Endpoint described by this configuration
    #[must_use]
    pub fn endpoint(&self) -> GeminiEndpoint {
        GeminiEndpoint::new(self.base_url.clone(), self.model.clone())
    }

    /// Duration of one render frame
    #[must_use]
    pub fn frame_duration(&self) -> Duration {
        Duration::from_secs(1) / self.fps.max(1)
    }

    /// Check value ranges
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ValidationError`] for an empty base URL or
    /// model, or an fps outside `1..=120`.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.base_url.trim().is_empty() {
            return Err(ConfigError::ValidationError(
                "api.base_url must not be empty".to_string(),
            ));
        }
        if self.model.trim().is_empty() {
            return Err(ConfigError::ValidationError(
                "api.model must not be empty".to_string(),
            ));
        }
        if self.fps == 0 || self.fps > MAX_FPS {
            return Err(ConfigError::ValidationError(format!(
                "ui.fps must be between 1 and {MAX_FPS}, got {}",
                self.fps
            )));
        }
        Ok(())
    }
}

// =============================================================================
// Configuration Loading
// =============================================================================

/// Get the default configuration file path
///
/// Returns `$XDG_CONFIG_HOME/gem3d/config.toml` or
/// `~/.config/gem3d/config.toml` if `XDG_CONFIG_HOME` is not set.
#[must_use]
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("gem3d").join("config.toml"))
}

/// Load configuration from the default path and the process environment
///
/// # Errors
///
/// Returns an error if the config file exists but cannot be parsed, or the
/// result fails validation. A missing config file is not an error.
pub fn load_config() -> Result<Gem3dConfig, ConfigError> {
    load_config_from_path(default_config_path())
}

/// Load configuration from a specific path and the process environment
///
/// # Errors
///
/// Returns an error if the specified config file cannot be read or parsed,
/// or the result fails validation.
pub fn load_config_from_path(path: Option<PathBuf>) -> Result<Gem3dConfig, ConfigError> {
    load_config_with_env(path, |name| std::env::var(name).ok())
}

/// Load configuration from a specific path with an injected env lookup
///
/// # Errors
///
/// Same as [`load_config_from_path`].
pub fn load_config_with_env<F>(path: Option<PathBuf>, env: F) -> Result<Gem3dConfig, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    // Start with defaults
    let mut config = Gem3dConfig::default();

    if let Some(ref config_path) = path {
        if config_path.exists() {
            let toml_content =
                std::fs::read_to_string(config_path).map_err(|e| ConfigError::ReadError {
                    path: config_path.clone(),
                    source: e,
                })?;

            let toml_config: Gem3dToml = toml::from_str(&toml_content)?;
            apply_toml_config(&mut config, &toml_config);
            config.config_file_path = Some(config_path.clone());
            config.source = ConfigSource::File;

            tracing::info!(
                path = %config_path.display(),
                "Loaded configuration from file"
            );
        } else {
            tracing::debug!(
                path = %config_path.display(),
                "Config file not found, using defaults"
            );
        }
    }

    // Environment overrides file values
    apply_env_config(&mut config, env);

    config.validate()?;
    Ok(config)
}

/// Seconds to a request timeout, 0 = no timeout
fn timeout_from_secs(secs: u64) -> Option<Duration> {
    (secs > 0).then(|| Duration::from_secs(secs))
}

/// Apply TOML configuration values to the config struct
fn apply_toml_config(config: &mut Gem3dConfig, toml: &Gem3dToml) {
    if let Some(ref base_url) = toml.api.base_url {
        config.base_url.clone_from(base_url);
    }
    if let Some(ref model) = toml.api.model {
        config.model.clone_from(model);
    }
    if let Some(secs) = toml.api.timeout_secs {
        config.timeout = timeout_from_secs(secs);
    }
    if let Some(fps) = toml.ui.fps {
        config.fps = fps;
    }
}

/// Apply environment variable overrides to the config
fn apply_env_config<F>(config: &mut Gem3dConfig, env: F)
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(base_url) = env("GEM3D_BASE_URL") {
        config.base_url = base_url;
        config.source = ConfigSource::Env;
    }
    if let Some(model) = env("GEM3D_MODEL") {
        config.model = model;
        config.source = ConfigSource::Env;
    }
    if let Some(timeout) = env("GEM3D_TIMEOUT_SECS") {
        if let Ok(secs) = timeout.parse::<u64>() {
            config.timeout = timeout_from_secs(secs);
            config.source = ConfigSource::Env;
        } else {
            tracing::warn!(value = %timeout, "Ignoring unparseable GEM3D_TIMEOUT_SECS");
        }
    }
    if let Some(fps) = env("GEM3D_FPS") {
        if let Ok(n) = fps.parse::<u32>() {
            config.fps = n;
            config.source = ConfigSource::Env;
        } else {
            tracing::warn!(value = %fps, "Ignoring unparseable GEM3D_FPS");
        }
    }
}

// =============================================================================
// CLI Override Support
// =============================================================================

/// Builder for applying CLI overrides to configuration
///
/// Use this after [`load_config`] to apply command-line argument overrides.
#[derive(Clone, Debug, Default)]
pub struct ConfigOverrides {
    /// Base URL override
    pub base_url: Option<String>,

    /// Model override
    pub model: Option<String>,

    /// Timeout override (seconds)
    pub timeout_secs: Option<u64>,

    /// Frame rate override
    pub fps: Option<u32>,
}

impl ConfigOverrides {
    /// Create a new empty set of overrides
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set base URL override
    #[must_use]
    pub fn with_base_url(mut self, base_url: String) -> Self {
        self.base_url = Some(base_url);
        self
    }

    /// Set model override
    #[must_use]
    pub fn with_model(mut self, model: String) -> Self {
        self.model = Some(model);
        self
    }

    /// Set timeout override
    #[must_use]
    pub fn with_timeout_secs(mut self, secs: u64) -> Self {
        self.timeout_secs = Some(secs);
        self
    }

    /// Set frame rate override
    #[must_use]
    pub fn with_fps(mut self, fps: u32) -> Self {
        self.fps = Some(fps);
        self
    }

    /// Apply overrides to a configuration and re-validate it
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ValidationError`] if an override is out of range.
    pub fn apply(&self, config: &mut Gem3dConfig) -> Result<(), ConfigError> {
        if self.base_url.is_some()
            || self.model.is_some()
            || self.timeout_secs.is_some()
            || self.fps.is_some()
        {
            config.source = ConfigSource::Cli;
        }

        if let Some(ref base_url) = self.base_url {
            config.base_url.clone_from(base_url);
        }
        if let Some(ref model) = self.model {
            config.model.clone_from(model);
        }
        if let Some(secs) = self.timeout_secs {
            config.timeout = timeout_from_secs(secs);
        }
        if let Some(fps) = self.fps {
            config.fps = fps;
        }

        config.validate()
    }
}

// =============================================================================
// Tests
// =============================================================================
