use serde::{Deserialize, Serialize};

/// Default provider terms for one recognized mood.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoodMapping {
    /// Mood keyword as typed by users (lowercase).
    pub mood: &'static str,
    /// Playlist search term.
    pub music_term: &'static str,
    /// Movie genre name, resolved to a provider id at lookup time.
    pub movie_genre: &'static str,
    /// Video search term.
    pub video_term: &'static str,
}

/// Provider queries derived from a mood phrase and an optional profile.
///
/// The `*_hint` fields carry the profile values that were merged in; the
/// resolved terms are what the providers are actually asked for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoodQuery {
    /// Normalized mood keyword.
    pub mood: String,
    pub genre_hint: Option<String>,
    pub artist_hint: Option<String>,
    pub movie_genre_hint: Option<String>,
    pub music_term: String,
    pub movie_genre: String,
    pub video_term: String,
}

impl MoodQuery {
    /// Whether any profile value was merged into this query.
    pub fn is_personalized(&self) -> bool {
        self.genre_hint.is_some() || self.artist_hint.is_some() || self.movie_genre_hint.is_some()
    }
}
