//! Environment variable secret provider.
//!
//! Read-only. A variable that is unset, empty, or not valid Unicode counts as
//! absent.

use secrecy::SecretString;

/// Upstream OpenRouter credential.
pub const OPENROUTER_KEY_ENV: &str = "OPENROUTER_API_KEY";

/// Shared secret expected in the `x-internal-secret` request header.
pub const INTERNAL_TOKEN_ENV: &str = "INTERNAL_API_TOKEN";

/// Environment variable secret provider.
pub struct EnvSecretProvider;

impl EnvSecretProvider {
    pub fn new() -> Self {
        Self
    }

    /// Look up `key`, returning `None` when it is not usable as a secret.
    pub fn get(&self, key: &str) -> Option<SecretString> {
        match std::env::var(key) {
            Ok(val) if !val.trim().is_empty() => Some(SecretString::from(val)),
            Ok(_) => None,
            Err(std::env::VarError::NotPresent) => None,
            Err(std::env::VarError::NotUnicode(_)) => {
                tracing::warn!(key, "ignoring non-Unicode secret value");
                None
            }
        }
    }
}

impl Default for EnvSecretProvider {
    fn default() -> Self {
        Self::new()
    }
}

/// The secrets a running server needs. Either may be missing; the request
/// handler reports a misconfiguration when one is required but absent.
pub struct Secrets {
    pub openrouter_api_key: Option<SecretString>,
    pub internal_token: Option<SecretString>,
}

impl Secrets {
    pub fn from_env() -> Self {
        Self::from_provider(&EnvSecretProvider::new())
    }

    pub fn from_provider(provider: &EnvSecretProvider) -> Self {
        Self {
            openrouter_api_key: provider.get(OPENROUTER_KEY_ENV),
            internal_token: provider.get(INTERNAL_TOKEN_ENV),
        }
    }
}
