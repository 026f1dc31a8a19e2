//! HTTP adapters for the external recommendation catalogs.
//!
//! Each adapter implements [`RecommendationProvider`](feelgood_core::provider::RecommendationProvider)
//! for one category. They share a single `reqwest::Client` built here and the
//! status-code mapping in [`check_status`].

pub mod spotify;
pub mod tmdb;
pub mod youtube;

use std::time::Duration;

use feelgood_core::provider::BoxRecommendationProvider;
use feelgood_types::config::BotConfig;
use feelgood_types::error::ProviderError;

use crate::credentials::Credentials;

pub use spotify::SpotifyProvider;
pub use tmdb::TmdbProvider;
pub use youtube::YouTubeProvider;

/// User agent sent with every catalog request.
const USER_AGENT: &str = concat!("feelgood-bot/", env!("CARGO_PKG_VERSION"));

/// Build the HTTP client shared by all catalog adapters.
///
/// `timeout` bounds each individual request; the recommendation service
/// applies its own per-lookup deadline on top.
pub fn build_http_client(timeout: Duration) -> Result<reqwest::Client, ProviderError> {
    reqwest::Client::builder()
        .timeout(timeout)
        .user_agent(USER_AGENT)
        .build()
        .map_err(|e| ProviderError::Http {
            message: format!("failed to create HTTP client: {e}"),
        })
}

/// The three catalog adapters, boxed for the recommendation service.
pub struct CatalogProviders {
    pub music: BoxRecommendationProvider,
    pub movies: BoxRecommendationProvider,
    pub videos: BoxRecommendationProvider,
}

/// Construct every catalog adapter from resolved credentials.
///
/// All adapters share one HTTP client whose request timeout matches the
/// configured per-provider timeout.
pub fn create_providers(
    credentials: &Credentials,
    config: &BotConfig,
) -> Result<CatalogProviders, ProviderError> {
    let client = build_http_client(Duration::from_secs(config.provider_timeout_secs))?;

    let spotify = SpotifyProvider::new(
        client.clone(),
        credentials.spotify_client_id.clone(),
        credentials.spotify_client_secret.clone(),
    )
    .with_market(config.spotify_market.clone());
    let tmdb = TmdbProvider::new(client.clone(), credentials.tmdb_api_key.clone());
    let youtube = YouTubeProvider::new(client, credentials.youtube_api_key.clone());

    Ok(CatalogProviders {
        music: BoxRecommendationProvider::new(spotify),
        movies: BoxRecommendationProvider::new(tmdb),
        videos: BoxRecommendationProvider::new(youtube),
    })
}

/// Map a non-success response onto a [`ProviderError`].
///
/// Successful responses are passed through untouched.
pub(crate) async fn check_status(
    response: reqwest::Response,
) -> Result<reqwest::Response, ProviderError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    Err(status_error(status.as_u16(), body))
}

fn status_error(status: u16, body: String) -> ProviderError {
    match status {
        401 | 403 => ProviderError::AuthenticationFailed(body),
        429 => ProviderError::RateLimited,
        _ => ProviderError::Status { status, body },
    }
}

pub(crate) fn http_error(e: reqwest::Error) -> ProviderError {
    ProviderError::Http {
        message: format!("HTTP request failed: {e}"),
    }
}

pub(crate) fn decode_error(e: reqwest::Error) -> ProviderError {
    ProviderError::Deserialization(format!("failed to parse response: {e}"))
}
