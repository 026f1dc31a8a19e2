//! Secret resolution service.
//!
//! SecretService resolves secrets through a chain of providers in priority order.
//! Resolution precedence: process environment > `.env` file.
//!
//! This service lives in `feelgood-core` and depends only on `feelgood-types`
//! and the `DynSecretProvider` abstraction -- never on concrete infra implementations.

use crate::repository::secret::DynSecretProvider;
use feelgood_types::error::{ConfigError, RepositoryError};
use feelgood_types::secret::SecretSource;

/// A secret value together with the backend that supplied it.
#[derive(Clone)]
pub struct ResolvedSecret {
    pub value: String,
    pub source: SecretSource,
}

impl std::fmt::Debug for ResolvedSecret {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResolvedSecret")
            .field("value", &SecretService::mask_secret(&self.value))
            .field("source", &self.source)
            .finish()
    }
}

/// Service for reading secrets across multiple storage backends.
///
/// Providers are ordered by precedence (first match wins).
/// Default chain: `[EnvSecretProvider, DotenvSecretProvider]`
pub struct SecretService {
    providers: Vec<DynSecretProvider>,
}

impl SecretService {
    /// Create a new SecretService with the given provider chain.
    ///
    /// Providers should be ordered by precedence (highest priority first).
    pub fn new(providers: Vec<DynSecretProvider>) -> Self {
        Self { providers }
    }

    /// Resolve a secret by iterating through providers in priority order.
    pub async fn get_secret(&self, key: &str) -> Result<Option<ResolvedSecret>, RepositoryError> {
        for provider in &self.providers {
            if let Some(value) = provider.get_boxed(key).await? {
                return Ok(Some(ResolvedSecret {
                    value,
                    source: provider.source(),
                }));
            }
        }
        Ok(None)
    }

    /// Resolve a secret that the bot cannot run without.
    ///
    /// Missing and blank values are both errors.
    pub async fn require(&self, key: &str) -> Result<ResolvedSecret, ConfigError> {
        match self.get_secret(key).await? {
            Some(secret) if secret.value.trim().is_empty() => {
                Err(ConfigError::EmptySecret(key.to_string()))
            }
            Some(secret) => Ok(secret),
            None => Err(ConfigError::MissingSecret(key.to_string())),
        }
    }

    /// Number of providers in the chain.
    pub fn provider_count(&self) -> usize {
        self.providers.len()
    }

    /// Mask a secret value, showing only the last 4 characters.
    ///
    /// - "sk-abcdefghijklmnop" -> "****mnop"
    /// - "abc" -> "****" (too short to show any chars)
    pub fn mask_secret(value: &str) -> String {
        let count = value.chars().count();
        if count <= 4 {
            "****".to_string()
        } else {
            let tail: String = value.chars().skip(count - 4).collect();
            format!("****{tail}")
        }
    }
}
