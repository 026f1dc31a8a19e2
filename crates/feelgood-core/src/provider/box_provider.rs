//! BoxRecommendationProvider -- object-safe dynamic dispatch wrapper for
//! RecommendationProvider.
//!
//! 1. Define an object-safe `RecommendationProviderDyn` trait with boxed futures
//! 2. Blanket-impl `RecommendationProviderDyn` for all `T: RecommendationProvider`
//! 3. `BoxRecommendationProvider` wraps `Box<dyn RecommendationProviderDyn>` and delegates

use std::future::Future;
use std::pin::Pin;

use feelgood_types::error::ProviderError;
use feelgood_types::recommendation::{Category, RecommendationItem, SearchRequest};

use super::RecommendationProvider;

/// Object-safe version of [`RecommendationProvider`] with boxed futures.
pub trait RecommendationProviderDyn: Send + Sync {
    fn name(&self) -> &str;

    fn category(&self) -> Category;

    fn search_boxed<'a>(
        &'a self,
        request: &'a SearchRequest,
    ) -> Pin<Box<dyn Future<Output = Result<Vec<RecommendationItem>, ProviderError>> + Send + 'a>>;
}

impl<T: RecommendationProvider> RecommendationProviderDyn for T {
    fn name(&self) -> &str {
        RecommendationProvider::name(self)
    }

    fn category(&self) -> Category {
        RecommendationProvider::category(self)
    }

    fn search_boxed<'a>(
        &'a self,
        request: &'a SearchRequest,
    ) -> Pin<Box<dyn Future<Output = Result<Vec<RecommendationItem>, ProviderError>> + Send + 'a>>
    {
        Box::pin(self.search(request))
    }
}

/// Type-erased recommendation provider.
///
/// Since `RecommendationProvider` uses RPITIT, it cannot be used as a trait
/// object directly. `BoxRecommendationProvider` provides equivalent methods
/// that delegate to the inner `RecommendationProviderDyn` trait object.
pub struct BoxRecommendationProvider {
    inner: Box<dyn RecommendationProviderDyn + Send + Sync>,
}

impl BoxRecommendationProvider {
    /// Wrap a concrete `RecommendationProvider` in a type-erased box.
    pub fn new<T: RecommendationProvider + 'static>(provider: T) -> Self {
        Self {
            inner: Box::new(provider),
        }
    }

    pub fn name(&self) -> &str {
        self.inner.name()
    }

    pub fn category(&self) -> Category {
        self.inner.category()
    }

    pub async fn search(
        &self,
        request: &SearchRequest,
    ) -> Result<Vec<RecommendationItem>, ProviderError> {
        self.inner.search_boxed(request).await
    }
}

impl std::fmt::Debug for BoxRecommendationProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BoxRecommendationProvider")
            .field("name", &self.name())
            .field("category", &self.category())
            .finish()
    }
}
