//! Environment variable secret provider.
//!
//! A read-only secret provider that checks environment variables.
//! This is the highest-priority provider in the resolution chain:
//! env vars override `.env` files.
//!
//! Key resolution: checks `FEELGOOD_{KEY}` first, then `key` directly
//! (e.g., "TMDB_API_KEY").

use feelgood_core::repository::secret::SecretProvider;
use feelgood_types::error::RepositoryError;
use feelgood_types::secret::SecretSource;

/// Prefix for bot-specific overrides of shared variable names.
const ENV_PREFIX: &str = "FEELGOOD_";

/// Environment variable secret provider.
pub struct EnvSecretProvider;

impl EnvSecretProvider {
    /// Create a new environment variable secret provider.
    pub fn new() -> Self {
        Self
    }
}

impl Default for EnvSecretProvider {
    fn default() -> Self {
        Self::new()
    }
}

fn read_var(name: &str) -> Option<String> {
    match std::env::var(name) {
        Ok(val) => Some(val),
        // Non-Unicode values are treated as absent since secrets must be valid strings
        Err(std::env::VarError::NotPresent) | Err(std::env::VarError::NotUnicode(_)) => None,
    }
}

impl SecretProvider for EnvSecretProvider {
    fn source(&self) -> SecretSource {
        SecretSource::Environment
    }

    async fn get(&self, key: &str) -> Result<Option<String>, RepositoryError> {
        if let Some(val) = read_var(&format!("{ENV_PREFIX}{key}")) {
            return Ok(Some(val));
        }
        Ok(read_var(key))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_env_provider_get_existing() {
        // SAFETY: The variable name is unique to this test and removed afterwards.
        unsafe { std::env::set_var("FEELGOOD_TEST_SECRET_1", "test-value-123") };

        let provider = EnvSecretProvider::new();
        let result = provider.get("FEELGOOD_TEST_SECRET_1").await.unwrap();

        assert_eq!(result, Some("test-value-123".to_string()));

        // SAFETY: The var was just set above.
        unsafe { std::env::remove_var("FEELGOOD_TEST_SECRET_1") };
    }

    #[tokio::test]
    async fn test_env_provider_prefixed_override_wins() {
        // SAFETY: The variable names are unique to this test and removed afterwards.
        unsafe {
            std::env::set_var("FG_TEST_TOKEN_2", "shared");
            std::env::set_var("FEELGOOD_FG_TEST_TOKEN_2", "bot-specific");
        }

        let provider = EnvSecretProvider::new();
        let result = provider.get("FG_TEST_TOKEN_2").await.unwrap();
        assert_eq!(result, Some("bot-specific".to_string()));

        // SAFETY: The vars were just set above.
        unsafe {
            std::env::remove_var("FG_TEST_TOKEN_2");
            std::env::remove_var("FEELGOOD_FG_TEST_TOKEN_2");
        }
    }

    #[tokio::test]
    async fn test_env_provider_get_missing() {
        let provider = EnvSecretProvider::new();
        let result = provider.get("NONEXISTENT_VAR_XYZ_123").await.unwrap();

        assert!(result.is_none());
    }

    #[test]
    fn test_env_provider_source() {
        assert_eq!(
            SecretProvider::source(&EnvSecretProvider::new()),
            SecretSource::Environment
        );
    }
}
