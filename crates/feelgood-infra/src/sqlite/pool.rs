//! SQLite connection pools for the profile database.
//!
//! Profiles are read on every mood request and written only by `!setprofile`,
//! so reads get a small pool of read-only connections while all writes go
//! through one connection. The file runs in WAL mode so readers never block
//! behind the writer.

use std::path::Path;
use std::str::FromStr;
use std::time::Duration;

use sqlx::sqlite::{
    SqliteConnectOptions, SqliteJournalMode, SqlitePool, SqlitePoolOptions, SqliteSynchronous,
};

/// Read-only connections kept for profile lookups.
const READER_CONNECTIONS: u32 = 4;

/// How long a connection waits on a locked database before failing.
const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// Reader and writer pools over the same database file.
#[derive(Clone)]
pub struct DatabasePool {
    pub reader: SqlitePool,
    pub writer: SqlitePool,
}

impl DatabasePool {
    /// Open (creating if needed) the database at `database_url` and apply
    /// pending migrations before any reader connects.
    pub async fn new(database_url: &str) -> Result<Self, sqlx::Error> {
        let options = SqliteConnectOptions::from_str(database_url)?
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal)
            .synchronous(SqliteSynchronous::Normal)
            .busy_timeout(BUSY_TIMEOUT);

        let writer = SqlitePoolOptions::new()
            .max_connections(1)
            .connect_with(options.clone())
            .await?;

        sqlx::migrate!("../../migrations").run(&writer).await?;

        let reader = SqlitePoolOptions::new()
            .max_connections(READER_CONNECTIONS)
            .connect_with(options.read_only(true))
            .await?;

        Ok(Self { reader, writer })
    }
}

/// Returns the default database URL for a data directory:
/// `sqlite://{data_dir}/feelgood.db?mode=rwc`.
pub fn default_database_url(data_dir: &Path) -> String {
    format!("sqlite://{}?mode=rwc", data_dir.join("feelgood.db").display())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_pool_creates_tables() {
        let dir = tempfile::tempdir().unwrap();
        let url = default_database_url(dir.path());

        let pool = DatabasePool::new(&url).await.unwrap();

        let tables: Vec<(String,)> = sqlx::query_as(
            "SELECT name FROM sqlite_master WHERE type='table' AND name NOT LIKE 'sqlite_%' AND name != '_sqlx_migrations' ORDER BY name",
        )
        .fetch_all(&pool.reader)
        .await
        .unwrap();

        let table_names: Vec<&str> = tables.iter().map(|t| t.0.as_str()).collect();
        assert!(table_names.contains(&"user_profiles"), "user_profiles table missing");
    }

    #[tokio::test]
    async fn test_user_profiles_schema() {
        let dir = tempfile::tempdir().unwrap();
        let pool = DatabasePool::new(&default_database_url(dir.path())).await.unwrap();

        // (name, notnull, pk)
        let columns: Vec<(String, i64, i64)> =
            sqlx::query_as("SELECT name, \"notnull\", pk FROM pragma_table_info('user_profiles') ORDER BY cid")
                .fetch_all(&pool.reader)
                .await
                .unwrap();

        let names: Vec<&str> = columns.iter().map(|c| c.0.as_str()).collect();
        assert_eq!(
            names,
            ["user_id", "genre", "artist", "movie_genre", "created_at", "updated_at"]
        );
        assert!(columns.iter().all(|c| c.1 == 1), "all columns are NOT NULL");
        let keys: Vec<&str> = columns.iter().filter(|c| c.2 > 0).map(|c| c.0.as_str()).collect();
        assert_eq!(keys, ["user_id"]);
    }

    #[tokio::test]
    async fn test_reader_rejects_writes() {
        let dir = tempfile::tempdir().unwrap();
        let pool = DatabasePool::new(&default_database_url(dir.path())).await.unwrap();

        let result = sqlx::query("DELETE FROM user_profiles").execute(&pool.reader).await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_pool_wal_mode() {
        let dir = tempfile::tempdir().unwrap();
        let url = default_database_url(dir.path());

        let pool = DatabasePool::new(&url).await.unwrap();

        let result: (String,) = sqlx::query_as("PRAGMA journal_mode")
            .fetch_one(&pool.writer)
            .await
            .unwrap();

        assert_eq!(result.0.to_lowercase(), "wal");
    }

    #[tokio::test]
    async fn test_pool_reopen_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let url = default_database_url(dir.path());

        let first = DatabasePool::new(&url).await.unwrap();
        drop(first);
        let second = DatabasePool::new(&url).await;
        assert!(second.is_ok());
    }

    #[test]
    fn test_default_database_url() {
        let url = default_database_url(Path::new("/tmp/feelgood"));
        assert_eq!(url, "sqlite:///tmp/feelgood/feelgood.db?mode=rwc");
    }
}
