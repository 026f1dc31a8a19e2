use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use std::fmt;

/// Opaque identifier of a chat user (a Discord snowflake rendered as text).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UserId(pub String);

impl UserId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Per-user personalization record.
///
/// Written wholesale by `!setprofile`: the three preference fields are always
/// replaced together, so a stored profile never has a partial set of fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    pub user_id: UserId,
    /// Preferred music genre (e.g. "rock").
    pub genre: String,
    /// Preferred artist (e.g. "Beatles").
    pub artist: String,
    /// Preferred movie genre name (e.g. "comedy").
    pub movie_genre: String,
}

impl UserProfile {
    pub fn new(
        user_id: UserId,
        genre: impl Into<String>,
        artist: impl Into<String>,
        movie_genre: impl Into<String>,
    ) -> Self {
        Self {
            user_id,
            genre: genre.into(),
            artist: artist.into(),
            movie_genre: movie_genre.into(),
        }
    }
}

/// A stored profile together with its bookkeeping timestamps.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileRecord {
    pub profile: UserProfile,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
