//! Application configuration model.
//!
//! The file format is TOML, read by `codechat-infrastructure`. Every key is
//! optional; missing sections fall back to the defaults defined here.

use serde::{Deserialize, Serialize};

use crate::context::DEFAULT_EMPTY_PLACEHOLDER;

pub const DEFAULT_GEMINI_MODEL: &str = "gemini-2.5-flash";
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta/models";
pub const DEFAULT_API_KEY_ENV: &str = "GEMINI_API_KEY";
pub const DEFAULT_PREAMBLE: &str = "You are a helpful programming assistant. \
The following is the code the user is currently working on. \
Use it as context when answering the questions that follow.";

/// Root configuration structure for config.toml
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub model: ModelConfig,
    #[serde(default)]
    pub context: ContextConfig,
}

/// Remote model settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelConfig {
    pub model_name: String,
    pub base_url: String,
    /// Name of the environment variable holding the API key.
    pub api_key_env: String,
    /// Overrides the HTTP client's default timeout when set.
    pub request_timeout_secs: Option<u64>,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            model_name: DEFAULT_GEMINI_MODEL.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key_env: DEFAULT_API_KEY_ENV.to_string(),
            request_timeout_secs: None,
        }
    }
}

/// How captured code is presented to the model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContextConfig {
    /// Instructional text placed before the captured code.
    pub preamble: String,
    /// Text sent when there is no code to capture.
    pub empty_placeholder: String,
}

impl Default for ContextConfig {
    fn default() -> Self {
        Self {
            preamble: DEFAULT_PREAMBLE.to_string(),
            empty_placeholder: DEFAULT_EMPTY_PLACEHOLDER.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_model_section_keeps_other_defaults() {
        let config: AppConfig = toml::from_str(
            r#"
            [model]
            model_name = "gemini-2.5-pro"
            "#,
        )
        .unwrap();

        assert_eq!(config.model.model_name, "gemini-2.5-pro");
        assert_eq!(config.model.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.model.api_key_env, DEFAULT_API_KEY_ENV);
        assert_eq!(config.context, ContextConfig::default());
    }

    #[test]
    fn test_empty_document_is_default() {
        let config: AppConfig = toml::from_str("").unwrap();
        assert_eq!(config, AppConfig::default());
    }
}
