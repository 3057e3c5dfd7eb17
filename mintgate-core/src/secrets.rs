//! Secret store access.
//!
//! The orchestrator receives a [`SecretProvider`] at construction instead of
//! reading ambient execution context, so the whole verification flow is
//! testable without a live serverless environment. Secrets are looked up
//! fresh on every invocation and their values are never logged.

use std::collections::HashMap;

/// Secret name for the 256-bit envelope decryption key (64 hex chars).
pub const DECRYPTION_KEY: &str = "DECRYPTION_KEY";

/// Secret name for the OAuth client ID used for token revocation.
pub const CLIENT_ID: &str = "CLIENT_ID";

/// Secret name for the OAuth client secret used for token revocation.
pub const CLIENT_SECRET: &str = "CLIENT_SECRET";

/// Secret name for the API key of wallet-mapping identity providers.
pub const PROVIDER_API_KEY: &str = "PROVIDER_API_KEY";

/// Read-only access to named secrets.
pub trait SecretProvider {
    /// Returns the secret value, or `None` if it is not provisioned.
    fn get(&self, name: &str) -> Option<String>;
}

/// Secrets sourced from process environment variables, the default in the
/// serverless execution environment.
#[derive(Debug, Clone, Copy, Default)]
pub struct EnvSecrets;

impl SecretProvider for EnvSecrets {
    fn get(&self, name: &str) -> Option<String> {
        std::env::var(name).ok()
    }
}

/// Fixed in-memory secrets, for tests and local tooling.
#[derive(Debug, Clone, Default)]
pub struct StaticSecrets(HashMap<String, String>);

impl StaticSecrets {
    /// Creates an empty secret map.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a secret, returning `self` for chaining.
    #[must_use]
    pub fn with(mut self, name: &str, value: &str) -> Self {
        self.0.insert(name.to_string(), value.to_string());
        self
    }
}

impl SecretProvider for StaticSecrets {
    fn get(&self, name: &str) -> Option<String> {
        self.0.get(name).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn static_secrets_return_only_provisioned_names() {
        let secrets = StaticSecrets::new().with(DECRYPTION_KEY, "aa".repeat(32).as_str());
        assert!(secrets.get(DECRYPTION_KEY).is_some());
        assert!(secrets.get(CLIENT_ID).is_none());
    }
}
