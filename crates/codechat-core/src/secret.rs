//! Credential lookup.
//!
//! Defines the interface for reading the API key at call time.

/// Source of the API credential.
///
/// Implementations are read-only and are consulted on every request, so a key
/// exported after startup is picked up by the next send.
///
/// # Security Note
///
/// Implementations must never log the returned value.
pub trait CredentialProvider: Send + Sync {
    /// Name shown to the user when the credential is missing
    /// (e.g. the environment variable to set).
    fn hint(&self) -> &str;

    /// The current credential. Empty means "not configured".
    fn api_key(&self) -> String;
}

/// A fixed credential, for tests and embedding.
#[derive(Debug, Clone)]
pub struct StaticCredential {
    hint: String,
    api_key: String,
}

impl StaticCredential {
    pub fn new(hint: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            hint: hint.into(),
            api_key: api_key.into(),
        }
    }
}

impl CredentialProvider for StaticCredential {
    fn hint(&self) -> &str {
        &self.hint
    }

    fn api_key(&self) -> String {
        self.api_key.clone()
    }
}
