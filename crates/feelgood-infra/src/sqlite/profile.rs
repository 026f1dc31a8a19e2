//! SQLite profile store implementation.
//!
//! Implements `ProfileStore` from `feelgood-core` using sqlx with split read/write pools.

use chrono::{DateTime, Utc};
use feelgood_core::repository::profile::ProfileStore;
use feelgood_types::error::RepositoryError;
use feelgood_types::profile::{ProfileRecord, UserId, UserProfile};
use sqlx::Row;

use super::pool::DatabasePool;

/// SQLite-backed implementation of `ProfileStore`.
#[derive(Clone)]
pub struct SqliteProfileStore {
    pool: DatabasePool,
}

impl SqliteProfileStore {
    /// Create a new profile store backed by the given database pool.
    pub fn new(pool: DatabasePool) -> Self {
        Self { pool }
    }

    /// Get the stored profile including its timestamps.
    pub async fn get_record(&self, user_id: &UserId) -> Result<Option<ProfileRecord>, RepositoryError> {
        let row = sqlx::query(
            "SELECT user_id, genre, artist, movie_genre, created_at, updated_at FROM user_profiles WHERE user_id = ?",
        )
        .bind(user_id.as_str())
        .fetch_optional(&self.pool.reader)
        .await
        .map_err(|e| RepositoryError::Query(e.to_string()))?;

        match row {
            Some(row) => {
                let profile_row =
                    ProfileRow::from_row(&row).map_err(|e| RepositoryError::Query(e.to_string()))?;
                Ok(Some(profile_row.into_record()?))
            }
            None => Ok(None),
        }
    }
}

// ---------------------------------------------------------------------------
// Private Row types for SQLite-to-domain mapping
// ---------------------------------------------------------------------------

struct ProfileRow {
    user_id: String,
    genre: String,
    artist: String,
    movie_genre: String,
    created_at: String,
    updated_at: String,
}

impl ProfileRow {
    fn from_row(row: &sqlx::sqlite::SqliteRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            user_id: row.try_get("user_id")?,
            genre: row.try_get("genre")?,
            artist: row.try_get("artist")?,
            movie_genre: row.try_get("movie_genre")?,
            created_at: row.try_get("created_at")?,
            updated_at: row.try_get("updated_at")?,
        })
    }

    fn into_record(self) -> Result<ProfileRecord, RepositoryError> {
        let created_at = parse_datetime(&self.created_at)?;
        let updated_at = parse_datetime(&self.updated_at)?;
        Ok(ProfileRecord {
            profile: UserProfile::new(UserId(self.user_id), self.genre, self.artist, self.movie_genre),
            created_at,
            updated_at,
        })
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn parse_datetime(s: &str) -> Result<DateTime<Utc>, RepositoryError> {
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| RepositoryError::Query(format!("invalid datetime: {e}")))
}

// ---------------------------------------------------------------------------
// ProfileStore implementation
// ---------------------------------------------------------------------------

impl ProfileStore for SqliteProfileStore {
    async fn get(&self, user_id: &UserId) -> Result<Option<UserProfile>, RepositoryError> {
        Ok(self.get_record(user_id).await?.map(|record| record.profile))
    }

    async fn upsert(&self, profile: &UserProfile) -> Result<(), RepositoryError> {
        let now = Utc::now().to_rfc3339();

        sqlx::query(
            r#"INSERT INTO user_profiles (user_id, genre, artist, movie_genre, created_at, updated_at)
               VALUES (?, ?, ?, ?, ?, ?)
               ON CONFLICT (user_id) DO UPDATE SET
                   genre = excluded.genre,
                   artist = excluded.artist,
                   movie_genre = excluded.movie_genre,
                   updated_at = excluded.updated_at"#,
        )
        .bind(profile.user_id.as_str())
        .bind(&profile.genre)
        .bind(&profile.artist)
        .bind(&profile.movie_genre)
        .bind(&now)
        .bind(&now)
        .execute(&self.pool.writer)
        .await
        .map_err(|e| RepositoryError::Query(e.to_string()))?;

        Ok(())
    }
}
