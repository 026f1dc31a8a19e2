//! Mood resolution: mood phrase + optional profile -> provider queries.
//!
//! One canonical table maps each recognized mood to its default music term,
//! movie genre and video term. Profile values are merged in by a fixed rule:
//!
//! | field         | rule                                                |
//! |---------------|-----------------------------------------------------|
//! | `music_term`  | default term, then profile genre, then artist       |
//! | `movie_genre` | profile movie genre replaces the default            |
//! | `video_term`  | default term, then profile genre                    |

use feelgood_types::mood::{MoodMapping, MoodQuery};
use feelgood_types::profile::UserProfile;

/// Canonical mood table.
pub const MOOD_TABLE: [MoodMapping; 3] = [
    MoodMapping {
        mood: "happy",
        music_term: "happy",
        movie_genre: "Comedy",
        video_term: "happy",
    },
    MoodMapping {
        mood: "stressed",
        music_term: "relax",
        movie_genre: "Drama",
        video_term: "stress relief",
    },
    MoodMapping {
        mood: "sad",
        music_term: "sad",
        movie_genre: "Romance",
        video_term: "sad",
    },
];

/// Reply for a mood phrase that is not in the table.
pub const UNKNOWN_MOOD_REPLY: &str =
    "Sorry, I don't have recommendations for that mood. Try \"happy\", \"stressed\", or \"sad\".";

/// Trim, collapse inner whitespace and lowercase a mood phrase.
pub fn normalize_mood(phrase: &str) -> String {
    phrase
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

/// Look up the table entry for a mood phrase.
pub fn lookup(phrase: &str) -> Option<&'static MoodMapping> {
    let normalized = normalize_mood(phrase);
    MOOD_TABLE.iter().find(|m| m.mood == normalized)
}

/// Keywords the resolver recognizes, in table order.
pub fn known_moods() -> impl Iterator<Item = &'static str> {
    MOOD_TABLE.iter().map(|m| m.mood)
}

/// Resolve a mood phrase into provider queries.
///
/// Returns `None` for phrases that are not in the table; callers answer
/// those with [`UNKNOWN_MOOD_REPLY`] instead of failing.
pub fn resolve(phrase: &str, profile: Option<&UserProfile>) -> Option<MoodQuery> {
    let mapping = lookup(phrase)?;

    let genre_hint = profile.and_then(|p| non_blank(&p.genre));
    let artist_hint = profile.and_then(|p| non_blank(&p.artist));
    let movie_genre_hint = profile.and_then(|p| non_blank(&p.movie_genre));

    let music_term = join_terms(&[
        Some(mapping.music_term),
        genre_hint.as_deref(),
        artist_hint.as_deref(),
    ]);
    let video_term = join_terms(&[Some(mapping.video_term), genre_hint.as_deref()]);
    let movie_genre = movie_genre_hint
        .clone()
        .unwrap_or_else(|| mapping.movie_genre.to_string());

    Some(MoodQuery {
        mood: mapping.mood.to_string(),
        genre_hint,
        artist_hint,
        movie_genre_hint,
        music_term,
        movie_genre,
        video_term,
    })
}

fn non_blank(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

fn join_terms(parts: &[Option<&str>]) -> String {
    parts.iter().flatten().copied().collect::<Vec<_>>().join(" ")
}
