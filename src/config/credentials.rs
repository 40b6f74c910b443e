//! Credential resolution from configuration.
//!
//! The API key is resolved once, when the upstream client is built, and then
//! travels as a [`SecureString`] so it never ends up in logs.

use super::types::ModelConfig;

/// Wrapper for sensitive strings that prevents accidental logging.
///
/// The inner value is never exposed via Debug or Display traits.
/// Use `expose()` to access the actual value when needed for API calls.
#[derive(Clone)]
pub struct SecureString(String);

impl SecureString {
    /// Create a new secure string.
    pub fn new(value: String) -> Self {
        Self(value)
    }

    /// Expose the inner value.
    ///
    /// Use sparingly and only when actually sending to APIs.
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Debug for SecureString {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "SecureString(••••••••)")
    }
}

impl std::fmt::Display for SecureString {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "••••••••")
    }
}

/// Status of credential resolution for the model.
#[derive(Debug, Clone)]
pub enum CredentialStatus {
    /// API key resolved successfully.
    Configured(SecureString),
    /// API key is missing or empty.
    Unconfigured {
        /// Reason for missing configuration.
        reason: String,
    },
}

impl CredentialStatus {
    pub fn key(&self) -> Option<&SecureString> {
        match self {
            CredentialStatus::Configured(key) => Some(key),
            CredentialStatus::Unconfigured { .. } => None,
        }
    }
}

impl ModelConfig {
    /// Resolve the API key from the config value, then the process environment.
    pub fn resolve_credential(&self) -> CredentialStatus {
        self.resolve_credential_with(|name| std::env::var(name).ok())
    }

    /// Resolve the API key using `lookup` in place of the process environment.
    pub fn resolve_credential_with<F>(&self, lookup: F) -> CredentialStatus
    where
        F: FnOnce(&str) -> Option<String>,
    {
        if let Some(ref key) = self.api_key {
            if !key.is_empty() {
                return CredentialStatus::Configured(SecureString::new(key.clone()));
            }
        }

        match lookup(&self.api_key_env) {
            Some(key) if !key.trim().is_empty() => {
                CredentialStatus::Configured(SecureString::new(key.trim().to_string()))
            }
            _ => CredentialStatus::Unconfigured {
                reason: format!(
                    "api_key is not set and environment variable {} is empty",
                    self.api_key_env
                ),
            },
        }
    }
}
