//! Unified path management for codechat files.
//!
//! # Directory Structure
//!
//! ```text
//! ~/.config/codechat/          # Config directory (platform dependent)
//! ├── config.toml              # Application configuration
//! └── logs/                    # Application logs
//!     └── codechat.log.YYYY-MM-DD
//! ```

use std::path::PathBuf;

use codechat_core::CodechatError;
use codechat_core::error::Result;

const APP_DIR: &str = "codechat";
const CONFIG_FILE: &str = "config.toml";
const LOGS_DIR: &str = "logs";

/// Resolves the well-known codechat locations.
pub struct CodechatPaths;

impl CodechatPaths {
    /// Returns the codechat configuration directory (e.g. `~/.config/codechat/`).
    pub fn config_dir() -> Result<PathBuf> {
        dirs::config_dir()
            .map(|dir| dir.join(APP_DIR))
            .ok_or_else(|| CodechatError::config("Cannot find config directory"))
    }

    /// Returns the path to `config.toml`.
    pub fn config_file() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join(CONFIG_FILE))
    }

    /// Returns the directory holding rolling log files.
    pub fn logs_dir() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join(LOGS_DIR))
    }
}
