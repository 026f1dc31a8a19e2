//! SpotifyProvider -- music recommendations from Spotify playlist search.
//!
//! Authenticates with the client-credentials flow and caches the access
//! token until shortly before it expires. The client secret is wrapped in
//! [`secrecy::SecretString`] and never logged.

use std::time::{Duration, Instant};

use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use tokio::sync::Mutex;

use feelgood_core::provider::RecommendationProvider;
use feelgood_types::error::ProviderError;
use feelgood_types::recommendation::{Category, RecommendationItem, SearchRequest};

use super::{check_status, decode_error, http_error};

/// Refresh the token this long before Spotify says it expires.
const TOKEN_EXPIRY_MARGIN: Duration = Duration::from_secs(60);

/// Spotify Web API playlist search.
pub struct SpotifyProvider {
    client: reqwest::Client,
    client_id: String,
    client_secret: SecretString,
    market: Option<String>,
    accounts_url: String,
    api_url: String,
    token: Mutex<Option<CachedToken>>,
}

struct CachedToken {
    access_token: SecretString,
    expires_at: Instant,
}

impl CachedToken {
    fn is_fresh(&self, now: Instant) -> bool {
        now < self.expires_at
    }
}

impl SpotifyProvider {
    pub fn new(client: reqwest::Client, client_id: String, client_secret: SecretString) -> Self {
        Self {
            client,
            client_id,
            client_secret,
            market: None,
            accounts_url: "https://accounts.spotify.com".to_string(),
            api_url: "https://api.spotify.com".to_string(),
            token: Mutex::new(None),
        }
    }

    /// Restrict results to an ISO 3166-1 market.
    pub fn with_market(mut self, market: Option<String>) -> Self {
        self.market = market.filter(|m| !m.trim().is_empty());
        self
    }

    /// Override the accounts and API base URLs (useful for testing or proxies).
    pub fn with_base_urls(mut self, accounts_url: String, api_url: String) -> Self {
        self.accounts_url = accounts_url;
        self.api_url = api_url;
        self
    }

    /// Return a valid access token, fetching a new one if the cache is stale.
    async fn access_token(&self) -> Result<SecretString, ProviderError> {
        let mut guard = self.token.lock().await;
        if let Some(cached) = guard.as_ref() {
            if cached.is_fresh(Instant::now()) {
                return Ok(cached.access_token.clone());
            }
        }

        let fetched = self.fetch_token().await?;
        let token = fetched.access_token.clone();
        *guard = Some(fetched);
        Ok(token)
    }

    async fn fetch_token(&self) -> Result<CachedToken, ProviderError> {
        tracing::debug!("requesting Spotify access token");

        let response = self
            .client
            .post(format!("{}/api/token", self.accounts_url))
            .basic_auth(&self.client_id, Some(self.client_secret.expose_secret()))
            .form(&[("grant_type", "client_credentials")])
            .send()
            .await
            .map_err(http_error)?;

        let token: TokenResponse = check_status(response)
            .await?
            .json()
            .await
            .map_err(decode_error)?;

        Ok(token.into_cached(Instant::now()))
    }

    async fn invalidate_token(&self) {
        *self.token.lock().await = None;
    }
}

impl RecommendationProvider for SpotifyProvider {
    fn name(&self) -> &str {
        "spotify"
    }

    fn category(&self) -> Category {
        Category::Music
    }

    async fn search(
        &self,
        request: &SearchRequest,
    ) -> Result<Vec<RecommendationItem>, ProviderError> {
        let token = self.access_token().await?;
        let limit = request.limit.to_string();

        let mut query = vec![
            ("q", request.term.as_str()),
            ("type", "playlist"),
            ("limit", limit.as_str()),
        ];
        if let Some(market) = &self.market {
            query.push(("market", market.as_str()));
        }

        let response = self
            .client
            .get(format!("{}/v1/search", self.api_url))
            .bearer_auth(token.expose_secret())
            .query(&query)
            .send()
            .await
            .map_err(http_error)?;

        let response = match check_status(response).await {
            Ok(response) => response,
            Err(err @ ProviderError::AuthenticationFailed(_)) => {
                // Revoked or rotated token; the next lookup fetches a new one.
                self.invalidate_token().await;
                return Err(err);
            }
            Err(err) => return Err(err),
        };

        let body: SearchResponse = response.json().await.map_err(decode_error)?;
        Ok(body.into_items(request.limit))
    }
}

// ---------------------------------------------------------------------------
// Wire types
// ---------------------------------------------------------------------------

#[derive(Deserialize)]
struct TokenResponse {
    access_token: String,
    expires_in: u64,
}

impl TokenResponse {
    fn into_cached(self, now: Instant) -> CachedToken {
        let lifetime = Duration::from_secs(self.expires_in).saturating_sub(TOKEN_EXPIRY_MARGIN);
        CachedToken {
            access_token: SecretString::from(self.access_token),
            expires_at: now + lifetime,
        }
    }
}

#[derive(Deserialize)]
struct SearchResponse {
    playlists: Option<PlaylistPage>,
}

#[derive(Deserialize)]
struct PlaylistPage {
    #[serde(default)]
    items: Vec<Option<Playlist>>,
}

#[derive(Deserialize)]
struct Playlist {
    name: String,
    external_urls: ExternalUrls,
}

#[derive(Deserialize)]
struct ExternalUrls {
    spotify: Option<String>,
}

impl SearchResponse {
    /// Spotify pads playlist pages with `null` entries; those are skipped.
    fn into_items(self, limit: usize) -> Vec<RecommendationItem> {
        self.playlists
            .map(|page| page.items)
            .unwrap_or_default()
            .into_iter()
            .flatten()
            .filter_map(|p| {
                p.external_urls
                    .spotify
                    .map(|url| RecommendationItem::new(p.name, url))
            })
            .take(limit)
            .collect()
    }
}
