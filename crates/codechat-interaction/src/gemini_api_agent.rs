//! GeminiApiAgent - Direct REST API implementation for Gemini.
//!
//! One blocking-from-the-caller's-view `generateContent` call per send. No
//! retry, no streaming. Every failure is reported as a [`ModelError`] whose
//! `Display` text is meant to be shown to the user as the assistant's reply.

use async_trait::async_trait;
use codechat_core::config::{
    DEFAULT_API_KEY_ENV, DEFAULT_BASE_URL, DEFAULT_GEMINI_MODEL, ModelConfig,
};
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use std::time::Duration;
use thiserror::Error;
use tracing::{info, warn};

use crate::request::GenerateContentRequest;

/// Reply used when a successful response carries no candidate text.
pub const NO_RESPONSE_TEXT: &str = "No response generated. Please try again.";

/// Failures of a model call, phrased for the end user.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ModelError {
    /// No API key is configured.
    #[error(
        "Error: API key not found. Please set the {env_var} environment variable \
         (for example `export {env_var}=your-key`) and try again."
    )]
    CredentialMissing { env_var: String },

    /// The API answered with an error envelope carrying a message.
    #[error("{message}")]
    Api { status: u16, message: String },

    /// The API answered with a non-success status and no usable message.
    #[error("API Error: {status}")]
    Status { status: u16 },

    /// The request never produced a response (connect, timeout, body read).
    #[error("Network error: {0}")]
    Network(String),

    /// The HTTP client could not be constructed.
    #[error("Failed to initialize HTTP client: {0}")]
    Setup(String),
}

impl ModelError {
    /// HTTP status of the failed call, when there was one.
    pub fn status(&self) -> Option<u16> {
        match self {
            ModelError::Api { status, .. } | ModelError::Status { status } => Some(*status),
            _ => None,
        }
    }
}

/// Something that can answer a [`GenerateContentRequest`].
#[async_trait]
pub trait ModelClient: Send + Sync {
    /// Sends the request and returns the reply text.
    async fn send(
        &self,
        request: &GenerateContentRequest,
        credential: &str,
    ) -> Result<String, ModelError>;
}

/// Agent implementation that talks to the Gemini HTTP API.
#[derive(Clone)]
pub struct GeminiApiAgent {
    client: Client,
    base_url: String,
    model: String,
    api_key_env: String,
}

impl Default for GeminiApiAgent {
    fn default() -> Self {
        Self::new(DEFAULT_GEMINI_MODEL)
    }
}

impl GeminiApiAgent {
    /// Creates a new agent for the given model using the public endpoint.
    pub fn new(model: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: DEFAULT_BASE_URL.to_string(),
            model: model.into(),
            api_key_env: DEFAULT_API_KEY_ENV.to_string(),
        }
    }

    /// Builds an agent from the `[model]` config section.
    pub fn from_config(config: &ModelConfig) -> Result<Self, ModelError> {
        let agent = Self::new(config.model_name.clone())
            .with_base_url(config.base_url.clone())
            .with_api_key_env(config.api_key_env.clone());
        match config.request_timeout_secs {
            Some(secs) => agent.with_timeout(Duration::from_secs(secs)),
            None => Ok(agent),
        }
    }

    /// Points the agent at a different endpoint root (proxies, tests).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    /// Names the variable reported when a send is attempted without a key.
    pub fn with_api_key_env(mut self, api_key_env: impl Into<String>) -> Self {
        self.api_key_env = api_key_env.into();
        self
    }

    /// Replaces the client's default timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Result<Self, ModelError> {
        self.client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|err| ModelError::Setup(err.to_string()))?;
        Ok(self)
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    fn endpoint(&self) -> String {
        format!("{}/{}:generateContent", self.base_url, self.model)
    }
}

#[async_trait]
impl ModelClient for GeminiApiAgent {
    async fn send(
        &self,
        request: &GenerateContentRequest,
        credential: &str,
    ) -> Result<String, ModelError> {
        if credential.trim().is_empty() {
            warn!(env_var = %self.api_key_env, "No API key, request not sent");
            return Err(ModelError::CredentialMissing {
                env_var: self.api_key_env.clone(),
            });
        }

        info!(
            model = %self.model,
            entries = request.contents.len(),
            "Sending generateContent request"
        );

        // `.json()` sets `Content-Type: application/json`
        let response = self
            .client
            .post(self.endpoint())
            .query(&[("key", credential)])
            .json(request)
            .send()
            .await
            .map_err(|err| {
                let err = err.without_url();
                warn!(error = %err, "Gemini API request failed");
                ModelError::Network(err.to_string())
            })?;

        let status = response.status();
        let body = response.text().await.map_err(|err| {
            let err = err.without_url();
            warn!(error = %err, "Failed to read Gemini response body");
            ModelError::Network(err.to_string())
        })?;

        if !status.is_success() {
            let error = map_http_error(status, &body);
            warn!(status = status.as_u16(), error = %error, "Gemini API returned an error");
            return Err(error);
        }

        Ok(extract_text_response(&body))
    }
}

#[derive(Deserialize)]
struct GenerateContentResponse {
    candidates: Option<Vec<Candidate>>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Option<ContentResponse>,
}

#[derive(Deserialize)]
struct ContentResponse {
    parts: Option<Vec<PartResponse>>,
}

#[derive(Deserialize)]
struct PartResponse {
    text: Option<String>,
}

#[derive(Deserialize)]
struct ErrorWrapper {
    error: ErrorBody,
}

#[derive(Deserialize)]
struct ErrorBody {
    message: Option<String>,
}

/// Pulls `candidates[0].content.parts[0].text` out of a success body.
///
/// Any missing step, or a body that is not JSON at all, yields
/// [`NO_RESPONSE_TEXT`].
pub fn extract_text_response(body: &str) -> String {
    serde_json::from_str::<GenerateContentResponse>(body)
        .ok()
        .and_then(|response| response.candidates)
        .and_then(|candidates| candidates.into_iter().next())
        .and_then(|candidate| candidate.content)
        .and_then(|content| content.parts)
        .and_then(|parts| parts.into_iter().next())
        .and_then(|part| part.text)
        .unwrap_or_else(|| NO_RESPONSE_TEXT.to_string())
}

/// Maps a non-success response onto a [`ModelError`].
pub fn map_http_error(status: StatusCode, body: &str) -> ModelError {
    let message = serde_json::from_str::<ErrorWrapper>(body)
        .ok()
        .and_then(|wrapper| wrapper.error.message)
        .filter(|message| !message.trim().is_empty());

    match message {
        Some(message) => ModelError::Api {
            status: status.as_u16(),
            message,
        },
        None => ModelError::Status {
            status: status.as_u16(),
        },
    }
}
