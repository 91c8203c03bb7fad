//! Environment-backed credential provider.

use codechat_core::secret::CredentialProvider;

/// Reads the API key from an environment variable on every call.
#[derive(Debug, Clone)]
pub struct EnvCredential {
    var: String,
}

impl EnvCredential {
    pub fn new(var: impl Into<String>) -> Self {
        Self { var: var.into() }
    }
}

impl CredentialProvider for EnvCredential {
    fn hint(&self) -> &str {
        &self.var
    }

    fn api_key(&self) -> String {
        std::env::var(&self.var)
            .map(|value| value.trim().to_string())
            .unwrap_or_default()
    }
}
