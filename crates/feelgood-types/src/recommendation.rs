use serde::{Deserialize, Serialize};

use std::fmt;

/// Media category served by one recommendation provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Music,
    Movie,
    Video,
}

impl Category {
    /// Section heading used in formatted replies.
    pub fn heading(&self) -> &'static str {
        match self {
            Category::Music => "Music",
            Category::Movie => "Movies",
            Category::Video => "Videos",
        }
    }

    /// Line rendered when a category has no results.
    pub fn empty_line(&self) -> &'static str {
        match self {
            Category::Music => "No playlist found.",
            Category::Movie => "No movie found.",
            Category::Video => "No video found.",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Category::Music => write!(f, "music"),
            Category::Movie => write!(f, "movie"),
            Category::Video => write!(f, "video"),
        }
    }
}

/// A single recommendation returned by a provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecommendationItem {
    pub title: String,
    /// Canonical link to the item on the provider's site.
    pub url: String,
}

impl RecommendationItem {
    pub fn new(title: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            url: url.into(),
        }
    }
}

/// Input to a provider lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchRequest {
    /// Free-text search term.
    pub term: String,
    /// Optional genre or category hint (movie provider resolves it to an id).
    pub genre: Option<String>,
    /// Maximum number of items to return.
    pub limit: usize,
}

/// Aggregated results for one mood request, one list per category.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecommendationSet {
    pub music: Vec<RecommendationItem>,
    pub movies: Vec<RecommendationItem>,
    pub videos: Vec<RecommendationItem>,
}

impl RecommendationSet {
    /// Sections in display order.
    pub fn sections(&self) -> [(Category, &[RecommendationItem]); 3] {
        [
            (Category::Music, self.music.as_slice()),
            (Category::Movie, self.movies.as_slice()),
            (Category::Video, self.videos.as_slice()),
        ]
    }

    pub fn is_empty(&self) -> bool {
        self.music.is_empty() && self.movies.is_empty() && self.videos.is_empty()
    }
}
