//! Application state wiring all services together.
//!
//! `AppState` resolves the data directory, settings and secret chain, which
//! is all `check-config` needs. `AppState::build_dispatcher` goes further and
//! opens the profile database and the catalog clients for the running bot.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use feelgood_core::command::Dispatcher;
use feelgood_core::recommend::RecommendationService;
use feelgood_core::service::secret::SecretService;
use feelgood_infra::config::{load_bot_config, resolve_data_dir};
use feelgood_infra::credentials::Credentials;
use feelgood_infra::provider::create_providers;
use feelgood_infra::secret::chain::{build_secret_chain, dotenv_candidates};
use feelgood_infra::secret::dotenv::DotenvSecretProvider;
use feelgood_infra::sqlite::pool::{default_database_url, DatabasePool};
use feelgood_infra::sqlite::profile::SqliteProfileStore;
use feelgood_types::config::BotConfig;

/// The dispatcher pinned to the concrete SQLite profile store.
pub type ConcreteDispatcher = Dispatcher<SqliteProfileStore>;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub data_dir: PathBuf,
    pub config: BotConfig,
    pub secret_service: Arc<SecretService>,
    /// The `.env` file secrets were read from, if one was found.
    pub dotenv_path: Option<PathBuf>,
}

impl AppState {
    /// Resolve the data directory, load settings and build the secret chain.
    pub async fn init(data_dir: Option<PathBuf>) -> anyhow::Result<Self> {
        let data_dir = data_dir.unwrap_or_else(resolve_data_dir);

        // Ensure data directory exists
        tokio::fs::create_dir_all(&data_dir).await?;

        let config = load_bot_config(&data_dir).await;

        let dotenv = DotenvSecretProvider::discover(&dotenv_candidates(&data_dir))?;
        let dotenv_path = dotenv.path().map(|p| p.to_path_buf());
        let dotenv_entries = dotenv.len();
        let secret_service = SecretService::new(build_secret_chain(Some(dotenv), true));

        tracing::debug!(
            data_dir = %data_dir.display(),
            dotenv = ?dotenv_path,
            dotenv_entries,
            secret_providers = secret_service.provider_count(),
            "application state initialized"
        );

        Ok(Self {
            data_dir,
            config,
            secret_service: Arc::new(secret_service),
            dotenv_path,
        })
    }

    /// Database URL: the `DATABASE_URL` credential, else the data-dir file.
    pub fn database_url(&self, credentials: &Credentials) -> String {
        credentials
            .database_url
            .clone()
            .unwrap_or_else(|| default_database_url(&self.data_dir))
    }

    /// Open the profile database and wire the recommendation pipeline.
    pub async fn build_dispatcher(
        &self,
        credentials: &Credentials,
    ) -> anyhow::Result<ConcreteDispatcher> {
        let db_pool = DatabasePool::new(&self.database_url(credentials)).await?;
        let profiles = SqliteProfileStore::new(db_pool);

        let providers = create_providers(credentials, &self.config)?;
        let recommender =
            RecommendationService::new(providers.music, providers.movies, providers.videos)
                .with_timeout(Duration::from_secs(self.config.provider_timeout_secs))
                .with_limit(self.config.results_per_category);

        Ok(Dispatcher::new(profiles, recommender)
            .with_max_message_chars(self.config.max_message_chars))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use feelgood_core::command::InboundMessage;
    use feelgood_types::profile::UserId;
    use secrecy::SecretString;
    use tempfile::TempDir;

    fn credentials(database_url: Option<String>) -> Credentials {
        Credentials {
            discord_token: SecretString::from("discord"),
            spotify_client_id: "id".to_string(),
            spotify_client_secret: SecretString::from("secret"),
            tmdb_api_key: SecretString::from("tmdb"),
            youtube_api_key: SecretString::from("youtube"),
            database_url,
        }
    }

    #[tokio::test]
    async fn test_init_creates_data_dir_and_loads_config() {
        let tmp = TempDir::new().unwrap();
        let data_dir = tmp.path().join("nested");

        let state = AppState::init(Some(data_dir.clone())).await.unwrap();

        assert!(data_dir.is_dir());
        assert_eq!(state.config, BotConfig::default());
        assert!(state.secret_service.provider_count() >= 1);
    }

    #[tokio::test]
    async fn test_database_url_prefers_credential() {
        let tmp = TempDir::new().unwrap();
        let state = AppState::init(Some(tmp.path().to_path_buf())).await.unwrap();

        assert_eq!(
            state.database_url(&credentials(Some("sqlite://other.db".to_string()))),
            "sqlite://other.db"
        );
        assert_eq!(
            state.database_url(&credentials(None)),
            default_database_url(tmp.path())
        );
    }

    #[tokio::test]
    async fn test_build_dispatcher_handles_unknown_mood_offline() {
        let tmp = TempDir::new().unwrap();
        let state = AppState::init(Some(tmp.path().to_path_buf())).await.unwrap();

        let dispatcher = state.build_dispatcher(&credentials(None)).await.unwrap();
        let replies = dispatcher
            .handle(&InboundMessage::new(UserId::new("1"), false, "!mood bored"))
            .await;

        assert_eq!(replies, vec![feelgood_core::mood::UNKNOWN_MOOD_REPLY.to_string()]);
        assert!(tmp.path().join("feelgood.db").exists());
    }
}
