//! Command-line arguments

use std::path::PathBuf;

use clap::Parser;

use gem3d_core::{load_config, load_config_from_path, ConfigError, ConfigOverrides, Gem3dConfig};

/// gem3d - ask Gemini 3 a question while a cube spins
#[derive(Parser, Debug)]
#[command(name = "gem3d-tui")]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Model to query (e.g. gemini-3-pro)
    #[arg(short = 'm', long, value_name = "MODEL")]
    pub model: Option<String>,

    /// Base URL of the generative-language service
    #[arg(long, value_name = "URL")]
    pub base_url: Option<String>,

    /// Configuration file path
    #[arg(short = 'c', long, env = "GEM3D_CONFIG", value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Request timeout in seconds (0 or unset: wait indefinitely)
    #[arg(long, value_name = "SECS")]
    pub timeout_secs: Option<u64>,

    /// Frame rate of the cube animation
    #[arg(long, value_name = "FPS")]
    pub fps: Option<u32>,

    /// Write logs to this file (the terminal is busy drawing)
    #[arg(long, env = "GEM3D_LOG_FILE", value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Log level when RUST_LOG is unset (trace, debug, info, warn, error)
    #[arg(short = 'l', long, env = "GEM3D_LOG_LEVEL", default_value = "info")]
    pub log_level: String,
}

impl Args {
    /// Flags that override file and environment configuration
    pub fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            base_url: self.base_url.clone(),
            model: self.model.clone(),
            timeout_secs: self.timeout_secs,
            fps: self.fps,
        }
    }

    /// Load configuration: file and environment first, then these flags
    ///
    /// # Errors
    ///
    /// Propagates file, parse and validation errors.
    pub fn load_config(&self) -> Result<Gem3dConfig, ConfigError> {
        let mut config = match &self.config {
            Some(path) => load_config_from_path(Some(path.clone()))?,
            None => load_config()?,
        };
        self.overrides().apply(&mut config)?;
        Ok(config)
    }
}
