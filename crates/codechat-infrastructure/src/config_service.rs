//! Configuration loading.
//!
//! Reads [`AppConfig`] from `config.toml`. A missing or empty file is not an
//! error: the defaults are used.

use std::fs;
use std::path::{Path, PathBuf};

use codechat_core::config::AppConfig;
use codechat_core::error::Result;
use tracing::{debug, info};

use crate::paths::CodechatPaths;

/// Loads the application configuration from a TOML file.
#[derive(Debug, Clone)]
pub struct ConfigService {
    path: PathBuf,
}

impl ConfigService {
    /// Uses the platform config location (`<config_dir>/codechat/config.toml`).
    pub fn new() -> Result<Self> {
        Ok(Self::with_path(CodechatPaths::config_file()?))
    }

    /// Uses an explicit file path.
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads and parses the file.
    ///
    /// # Returns
    ///
    /// - `Ok(AppConfig::default())`: the file does not exist or is blank
    /// - `Ok(config)`: the file was parsed; absent keys take default values
    /// - `Err(CodechatError)`: the file exists but cannot be read or parsed
    pub fn load(&self) -> Result<AppConfig> {
        if !self.path.exists() {
            debug!(path = %self.path.display(), "No config file, using defaults");
            return Ok(AppConfig::default());
        }

        let content = fs::read_to_string(&self.path)?;
        if content.trim().is_empty() {
            return Ok(AppConfig::default());
        }

        let config: AppConfig = toml::from_str(&content)?;
        info!(path = %self.path.display(), model = %config.model.model_name, "Loaded config");
        Ok(config)
    }
}
