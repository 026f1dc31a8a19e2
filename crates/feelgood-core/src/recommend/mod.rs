//! Recommendation aggregation.
//!
//! `RecommendationService` fans a `MoodQuery` out to the music, movie and
//! video providers and collects the results into a `RecommendationSet`.
//! Provider errors and timeouts never leave this module.

use std::time::{Duration, Instant};

use tracing::Instrument;

use feelgood_types::mood::MoodQuery;
use feelgood_types::recommendation::{RecommendationItem, RecommendationSet, SearchRequest};

use crate::provider::BoxRecommendationProvider;

/// Default timeout applied to each provider lookup.
pub const DEFAULT_PROVIDER_TIMEOUT: Duration = Duration::from_secs(10);

/// Aggregates the three recommendation providers.
pub struct RecommendationService {
    music: BoxRecommendationProvider,
    movies: BoxRecommendationProvider,
    videos: BoxRecommendationProvider,
    timeout: Duration,
    limit: usize,
}

impl RecommendationService {
    /// Create a service with the default timeout and one result per category.
    pub fn new(
        music: BoxRecommendationProvider,
        movies: BoxRecommendationProvider,
        videos: BoxRecommendationProvider,
    ) -> Self {
        Self {
            music,
            movies,
            videos,
            timeout: DEFAULT_PROVIDER_TIMEOUT,
            limit: 1,
        }
    }

    /// Override the per-provider timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Override how many items each provider is asked for (minimum 1).
    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = limit.max(1);
        self
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    /// Build the provider requests for a resolved mood query.
    pub fn requests_for(&self, query: &MoodQuery) -> [SearchRequest; 3] {
        [
            SearchRequest {
                term: query.music_term.clone(),
                genre: query.genre_hint.clone(),
                limit: self.limit,
            },
            SearchRequest {
                term: query.movie_genre.clone(),
                genre: Some(query.movie_genre.clone()),
                limit: self.limit,
            },
            SearchRequest {
                term: query.video_term.clone(),
                genre: query.genre_hint.clone(),
                limit: self.limit,
            },
        ]
    }

    /// Run all three lookups concurrently.
    ///
    /// Each lookup is bounded by the configured timeout. A failing or slow
    /// provider contributes an empty list; the other categories are kept.
    pub async fn recommend(&self, query: &MoodQuery) -> RecommendationSet {
        let [music_req, movie_req, video_req] = self.requests_for(query);

        let span = tracing::info_span!(
            "recommend",
            mood = %query.mood,
            personalized = query.is_personalized(),
            limit = self.limit(),
            timeout_ms = self.timeout().as_millis() as u64,
        );

        async {
            let (music, movies, videos) = tokio::join!(
                self.lookup(&self.music, &music_req),
                self.lookup(&self.movies, &movie_req),
                self.lookup(&self.videos, &video_req),
            );
            RecommendationSet {
                music,
                movies,
                videos,
            }
        }
        .instrument(span)
        .await
    }

    async fn lookup(
        &self,
        provider: &BoxRecommendationProvider,
        request: &SearchRequest,
    ) -> Vec<RecommendationItem> {
        let started = Instant::now();
        let outcome = tokio::time::timeout(self.timeout, provider.search(request)).await;
        let elapsed_ms = started.elapsed().as_millis() as u64;

        match outcome {
            Ok(Ok(mut items)) => {
                items.truncate(request.limit);
                tracing::debug!(
                    provider = %provider.name(),
                    category = %provider.category(),
                    term = %request.term,
                    results = items.len(),
                    elapsed_ms,
                    "Provider lookup finished"
                );
                items
            }
            Ok(Err(e)) => {
                tracing::warn!(
                    provider = %provider.name(),
                    category = %provider.category(),
                    term = %request.term,
                    error = %e,
                    elapsed_ms,
                    "Provider lookup failed, returning no results"
                );
                Vec::new()
            }
            Err(_) => {
                tracing::warn!(
                    provider = %provider.name(),
                    category = %provider.category(),
                    term = %request.term,
                    timeout_ms = self.timeout.as_millis() as u64,
                    "Provider lookup timed out, returning no results"
                );
                Vec::new()
            }
        }
    }
}
