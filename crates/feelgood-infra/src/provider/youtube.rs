//! YouTubeProvider -- video recommendations from the YouTube Data API v3.

use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;

use feelgood_core::provider::RecommendationProvider;
use feelgood_types::error::ProviderError;
use feelgood_types::recommendation::{Category, RecommendationItem, SearchRequest};

use super::{check_status, decode_error, http_error};

const WATCH_BASE: &str = "https://www.youtube.com/watch?v=";

/// Most-viewed video search.
pub struct YouTubeProvider {
    client: reqwest::Client,
    api_key: SecretString,
    base_url: String,
}

impl YouTubeProvider {
    pub fn new(client: reqwest::Client, api_key: SecretString) -> Self {
        Self {
            client,
            api_key,
            base_url: "https://www.googleapis.com".to_string(),
        }
    }

    /// Override the base URL (useful for testing or proxies).
    pub fn with_base_url(mut self, base_url: String) -> Self {
        self.base_url = base_url;
        self
    }
}

/// Watch page URL for a video id.
pub fn watch_url(video_id: &str) -> String {
    format!("{WATCH_BASE}{video_id}")
}

impl RecommendationProvider for YouTubeProvider {
    fn name(&self) -> &str {
        "youtube"
    }

    fn category(&self) -> Category {
        Category::Video
    }

    async fn search(
        &self,
        request: &SearchRequest,
    ) -> Result<Vec<RecommendationItem>, ProviderError> {
        let max_results = request.limit.to_string();

        let response = self
            .client
            .get(format!("{}/youtube/v3/search", self.base_url))
            .query(&[
                ("part", "snippet"),
                ("q", request.term.as_str()),
                ("type", "video"),
                ("order", "viewCount"),
                ("maxResults", max_results.as_str()),
                ("key", self.api_key.expose_secret()),
            ])
            .send()
            .await
            .map_err(http_error)?;

        let body: SearchListResponse = check_status(response)
            .await?
            .json()
            .await
            .map_err(decode_error)?;

        Ok(body.into_items(request.limit))
    }
}

// ---------------------------------------------------------------------------
// Wire types
// ---------------------------------------------------------------------------

#[derive(Deserialize)]
struct SearchListResponse {
    #[serde(default)]
    items: Vec<SearchResult>,
}

#[derive(Deserialize)]
struct SearchResult {
    id: ResourceId,
    snippet: Option<Snippet>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ResourceId {
    video_id: Option<String>,
}

#[derive(Deserialize)]
struct Snippet {
    title: String,
}

impl SearchListResponse {
    /// Results without a `videoId` (channels, playlists) are skipped.
    fn into_items(self, limit: usize) -> Vec<RecommendationItem> {
        self.items
            .into_iter()
            .filter_map(|item| {
                let video_id = item.id.video_id?;
                let title = item
                    .snippet
                    .map(|s| s.title)
                    .unwrap_or_else(|| video_id.clone());
                Some(RecommendationItem::new(title, watch_url(&video_id)))
            })
            .take(limit)
            .collect()
    }
}
