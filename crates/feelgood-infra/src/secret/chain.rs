//! Secret chain builder -- wires concrete providers in priority order.
//!
//! This module lives in `feelgood-infra` because it assembles concrete
//! provider implementations. The resulting chain is passed to `SecretService`
//! in `feelgood-core` via the `DynSecretProvider` abstraction.
//!
//! Default chain order: `[EnvSecretProvider, DotenvSecretProvider]`

use std::path::{Path, PathBuf};
use std::sync::Arc;

use feelgood_core::repository::secret::DynSecretProvider;

use crate::secret::dotenv::DotenvSecretProvider;
use crate::secret::env::EnvSecretProvider;

/// Build the secret resolution chain.
///
/// The chain is ordered by precedence (first match wins):
/// 1. Environment variables (if `include_env` is true)
/// 2. `.env` file (if `dotenv` is Some)
pub fn build_secret_chain(
    dotenv: Option<DotenvSecretProvider>,
    include_env: bool,
) -> Vec<DynSecretProvider> {
    let mut chain: Vec<DynSecretProvider> = Vec::new();

    if include_env {
        chain.push(Arc::new(EnvSecretProvider::new()));
    }

    if let Some(file) = dotenv {
        chain.push(Arc::new(file));
    }

    chain
}

/// Candidate `.env` locations: the working directory first, then the data dir.
pub fn dotenv_candidates(data_dir: &Path) -> Vec<PathBuf> {
    vec![PathBuf::from(".env"), data_dir.join(".env")]
}
