//! Recommendation provider port.
//!
//! Each external catalog (music, movie, video) is one `RecommendationProvider`.
//! Concrete HTTP adapters live in feelgood-infra; `BoxRecommendationProvider`
//! erases them so the recommendation service can hold all three.

pub mod box_provider;

use feelgood_types::error::ProviderError;
use feelgood_types::recommendation::{Category, RecommendationItem, SearchRequest};

pub use box_provider::BoxRecommendationProvider;

/// Trait for external recommendation catalogs.
///
/// Uses native async fn in traits (RPITIT, Rust 2024 edition).
/// Results are ordered by the provider's own relevance/popularity ranking
/// and hold at most `request.limit` items.
pub trait RecommendationProvider: Send + Sync {
    /// Human-readable provider name (e.g., "spotify", "tmdb").
    fn name(&self) -> &str;

    /// Which category this provider serves.
    fn category(&self) -> Category;

    /// Look up items for a search request.
    fn search(
        &self,
        request: &SearchRequest,
    ) -> impl std::future::Future<Output = Result<Vec<RecommendationItem>, ProviderError>> + Send;
}
