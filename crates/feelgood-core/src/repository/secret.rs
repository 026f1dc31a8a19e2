//! Secret provider trait definition and its object-safe wrapper.
//!
//! `SecretProvider` uses RPITIT, so it cannot be a trait object directly.
//! `SecretProviderDyn` is the boxed-future twin with a blanket impl, and
//! `DynSecretProvider` is the shared handle the `SecretService` chain holds.

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use feelgood_types::error::RepositoryError;
use feelgood_types::secret::SecretSource;

/// Trait for read-only secret backends (environment, `.env` file).
///
/// The `SecretService` chains multiple providers in priority order.
pub trait SecretProvider: Send + Sync {
    /// Which backend this provider reads from.
    fn source(&self) -> SecretSource;

    /// Retrieve a secret value by key.
    /// Returns None if the secret does not exist in this provider.
    fn get(
        &self,
        key: &str,
    ) -> impl Future<Output = Result<Option<String>, RepositoryError>> + Send;
}

/// Object-safe version of [`SecretProvider`] with boxed futures.
pub trait SecretProviderDyn: Send + Sync {
    fn source(&self) -> SecretSource;

    fn get_boxed<'a>(
        &'a self,
        key: &'a str,
    ) -> Pin<Box<dyn Future<Output = Result<Option<String>, RepositoryError>> + Send + 'a>>;
}

impl<T: SecretProvider> SecretProviderDyn for T {
    fn source(&self) -> SecretSource {
        SecretProvider::source(self)
    }

    fn get_boxed<'a>(
        &'a self,
        key: &'a str,
    ) -> Pin<Box<dyn Future<Output = Result<Option<String>, RepositoryError>> + Send + 'a>> {
        Box::pin(self.get(key))
    }
}

/// Shared, type-erased secret provider used in resolution chains.
pub type DynSecretProvider = Arc<dyn SecretProviderDyn>;
