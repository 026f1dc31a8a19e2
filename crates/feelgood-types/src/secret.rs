//! Secret names and their resolution sources.

use serde::{Deserialize, Serialize};

use std::fmt;

/// Discord bot authentication token.
pub const DISCORD_BOT_TOKEN: &str = "DISCORD_BOT_TOKEN";
/// Spotify client-credential id.
pub const SPOTIFY_CLIENT_ID: &str = "SPOTIFY_CLIENT_ID";
/// Spotify client-credential secret.
pub const SPOTIFY_CLIENT_SECRET: &str = "SPOTIFY_CLIENT_SECRET";
/// TMDb v3 API key.
pub const TMDB_API_KEY: &str = "TMDB_API_KEY";
/// YouTube Data API v3 key.
pub const YOUTUBE_API_KEY: &str = "YOUTUBE_API_KEY";
/// Optional profile database connection string.
pub const DATABASE_URL: &str = "DATABASE_URL";

/// Every credential the bot cannot start without.
pub const REQUIRED_SECRETS: [&str; 5] = [
    DISCORD_BOT_TOKEN,
    SPOTIFY_CLIENT_ID,
    SPOTIFY_CLIENT_SECRET,
    TMDB_API_KEY,
    YOUTUBE_API_KEY,
];

/// Where a resolved secret came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SecretSource {
    /// Process environment variable.
    Environment,
    /// `.env` file on disk.
    Dotenv,
}

impl fmt::Display for SecretSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SecretSource::Environment => write!(f, "environment"),
            SecretSource::Dotenv => write!(f, "dotenv"),
        }
    }
}
