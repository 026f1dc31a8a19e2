//! TmdbProvider -- movie recommendations from TMDb discovery.
//!
//! Movie genres arrive as human names such as "Comedy" and are resolved to
//! TMDb's numeric ids through the genre list endpoint. The list is fetched
//! at most once per process and cached in a [`DashMap`].

use std::sync::atomic::{AtomicBool, Ordering};

use dashmap::DashMap;
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;

use feelgood_core::provider::RecommendationProvider;
use feelgood_types::error::ProviderError;
use feelgood_types::recommendation::{Category, RecommendationItem, SearchRequest};

use super::{check_status, decode_error, http_error};

/// Public page for a movie id.
const MOVIE_PAGE_BASE: &str = "https://www.themoviedb.org/movie";

/// Genre ids used by the default mood table, known without a lookup.
const BUILTIN_GENRES: [(&str, u32); 3] = [("comedy", 35), ("drama", 18), ("romance", 10749)];

/// TMDb v3 discover client.
pub struct TmdbProvider {
    client: reqwest::Client,
    api_key: SecretString,
    base_url: String,
    genres: DashMap<String, u32>,
    genres_loaded: AtomicBool,
}

impl TmdbProvider {
    pub fn new(client: reqwest::Client, api_key: SecretString) -> Self {
        let genres = DashMap::new();
        for (name, id) in BUILTIN_GENRES {
            genres.insert(name.to_string(), id);
        }

        Self {
            client,
            api_key,
            base_url: "https://api.themoviedb.org".to_string(),
            genres,
            genres_loaded: AtomicBool::new(false),
        }
    }

    /// Override the base URL (useful for testing or proxies).
    pub fn with_base_url(mut self, base_url: String) -> Self {
        self.base_url = base_url;
        self
    }

    /// Resolve a genre name or numeric id to a TMDb genre id.
    ///
    /// Names match case-insensitively. A miss triggers a single fetch of the
    /// genre list; later misses are answered from the cache alone.
    pub async fn resolve_genre(&self, genre: &str) -> Result<u32, ProviderError> {
        let genre = genre.trim();
        if let Ok(id) = genre.parse::<u32>() {
            return Ok(id);
        }

        let key = genre.to_lowercase();
        if let Some(id) = self.genres.get(&key) {
            return Ok(*id);
        }

        if !self.genres_loaded.load(Ordering::Acquire) {
            self.load_genres().await?;
            if let Some(id) = self.genres.get(&key) {
                return Ok(*id);
            }
        }

        Err(ProviderError::UnknownGenre(genre.to_string()))
    }

    async fn load_genres(&self) -> Result<(), ProviderError> {
        tracing::debug!("fetching TMDb movie genre list");

        let response = self
            .client
            .get(format!("{}/3/genre/movie/list", self.base_url))
            .query(&[("api_key", self.api_key.expose_secret())])
            .send()
            .await
            .map_err(http_error)?;

        let list: GenreList = check_status(response)
            .await?
            .json()
            .await
            .map_err(decode_error)?;

        self.cache_genres(list);
        Ok(())
    }

    fn cache_genres(&self, list: GenreList) {
        for genre in list.genres {
            self.genres.insert(genre.name.to_lowercase(), genre.id);
        }
        self.genres_loaded.store(true, Ordering::Release);
        tracing::debug!(count = self.genres.len(), "cached TMDb genres");
    }
}

/// Public page URL for a TMDb movie id.
pub fn movie_url(id: u64) -> String {
    format!("{MOVIE_PAGE_BASE}/{id}")
}

impl RecommendationProvider for TmdbProvider {
    fn name(&self) -> &str {
        "tmdb"
    }

    fn category(&self) -> Category {
        Category::Movie
    }

    async fn search(
        &self,
        request: &SearchRequest,
    ) -> Result<Vec<RecommendationItem>, ProviderError> {
        let genre = request.genre.as_deref().unwrap_or(&request.term);
        let genre_id = self.resolve_genre(genre).await?.to_string();

        let response = self
            .client
            .get(format!("{}/3/discover/movie", self.base_url))
            .query(&[
                ("api_key", self.api_key.expose_secret()),
                ("with_genres", genre_id.as_str()),
                ("sort_by", "popularity.desc"),
                ("page", "1"),
            ])
            .send()
            .await
            .map_err(http_error)?;

        let page: DiscoverPage = check_status(response)
            .await?
            .json()
            .await
            .map_err(decode_error)?;

        Ok(page.into_items(request.limit))
    }
}

// ---------------------------------------------------------------------------
// Wire types
// ---------------------------------------------------------------------------

#[derive(Deserialize)]
struct GenreList {
    #[serde(default)]
    genres: Vec<Genre>,
}

#[derive(Deserialize)]
struct Genre {
    id: u32,
    name: String,
}

#[derive(Deserialize)]
struct DiscoverPage {
    #[serde(default)]
    results: Vec<Movie>,
}

#[derive(Deserialize)]
struct Movie {
    id: u64,
    #[serde(default)]
    title: Option<String>,
}

impl DiscoverPage {
    fn into_items(self, limit: usize) -> Vec<RecommendationItem> {
        self.results
            .into_iter()
            .take(limit)
            .map(|m| {
                let title = m.title.unwrap_or_else(|| format!("Movie {}", m.id));
                RecommendationItem::new(title, movie_url(m.id))
            })
            .collect()
    }
}
