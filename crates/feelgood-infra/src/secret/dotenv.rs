//! `.env` file secret provider.
//!
//! Parses a dotenv file once at construction with `dotenvy` and serves
//! lookups from memory. The process environment is never modified, so the
//! environment provider keeps its higher precedence.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use feelgood_core::repository::secret::SecretProvider;
use feelgood_types::error::RepositoryError;
use feelgood_types::secret::SecretSource;

/// Read-only provider backed by a parsed `.env` file.
pub struct DotenvSecretProvider {
    path: Option<PathBuf>,
    values: HashMap<String, String>,
}

impl DotenvSecretProvider {
    /// Load `path`. A missing file yields an empty provider; a malformed
    /// file is an error.
    pub fn load(path: &Path) -> Result<Self, RepositoryError> {
        let iter = match dotenvy::from_path_iter(path) {
            Ok(iter) => iter,
            Err(e) if e.not_found() => {
                tracing::debug!("No .env file at {}", path.display());
                return Ok(Self::empty());
            }
            Err(e) => {
                return Err(RepositoryError::Query(format!(
                    "failed to read {}: {e}",
                    path.display()
                )));
            }
        };

        let mut values = HashMap::new();
        for item in iter {
            let (key, value) = item.map_err(|e| {
                RepositoryError::Query(format!("failed to parse {}: {e}", path.display()))
            })?;
            values.insert(key, value);
        }

        tracing::debug!(entries = values.len(), "Loaded secrets from {}", path.display());
        Ok(Self {
            path: Some(path.to_path_buf()),
            values,
        })
    }

    /// Load the first candidate file that exists, or an empty provider.
    pub fn discover(candidates: &[PathBuf]) -> Result<Self, RepositoryError> {
        for candidate in candidates {
            if candidate.is_file() {
                return Self::load(candidate);
            }
        }
        Ok(Self::empty())
    }

    fn empty() -> Self {
        Self {
            path: None,
            values: HashMap::new(),
        }
    }

    /// The file the values came from, if any was found.
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl SecretProvider for DotenvSecretProvider {
    fn source(&self) -> SecretSource {
        SecretSource::Dotenv
    }

    async fn get(&self, key: &str) -> Result<Option<String>, RepositoryError> {
        Ok(self.values.get(key).cloned())
    }
}
