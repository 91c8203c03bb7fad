//! Error types for the codechat workspace.

use thiserror::Error;

/// A shared error type for configuration and startup concerns.
///
/// Errors that happen during a send cycle never surface as this type: they are
/// folded into assistant-visible text by the session. This type covers the
/// things that can legitimately stop the program before the first prompt.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CodechatError {
    /// IO error (file system operations)
    #[error("IO error: {message}")]
    Io { message: String },

    /// Serialization/deserialization error
    #[error("Serialization error: {format} - {message}")]
    Serialization {
        format: String, // "TOML", "JSON"
        message: String,
    },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl CodechatError {
    // ============================================================================
    // Constructor helpers
    // ============================================================================

    /// Creates a Config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Check if this is a serialization error
    pub fn is_serialization(&self) -> bool {
        matches!(self, Self::Serialization { .. })
    }
}

// ============================================================================
// From implementations for automatic conversion
// ============================================================================

impl From<std::io::Error> for CodechatError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            message: format!("{} (kind: {:?})", err, err.kind()),
        }
    }
}

impl From<serde_json::Error> for CodechatError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization {
            format: "JSON".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<toml::de::Error> for CodechatError {
    fn from(err: toml::de::Error) -> Self {
        Self::Serialization {
            format: "TOML".to_string(),
            message: err.to_string(),
        }
    }
}

/// A type alias for `Result<T, CodechatError>`.
pub type Result<T> = std::result::Result<T, CodechatError>;
