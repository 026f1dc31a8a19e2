//! Profile store trait definition.

use feelgood_types::error::RepositoryError;
use feelgood_types::profile::{UserId, UserProfile};

/// Trait for per-user profile persistence.
///
/// Uses RPITIT (native async fn in traits, Rust 2024 edition).
/// Implementations live in feelgood-infra.
pub trait ProfileStore: Send + Sync {
    /// Get the profile for a user. Returns None if the user never set one.
    fn get(
        &self,
        user_id: &UserId,
    ) -> impl std::future::Future<Output = Result<Option<UserProfile>, RepositoryError>> + Send;

    /// Insert the profile, or replace all preference fields if it exists.
    fn upsert(
        &self,
        profile: &UserProfile,
    ) -> impl std::future::Future<Output = Result<(), RepositoryError>> + Send;
}
