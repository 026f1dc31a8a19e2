//! Startup credentials resolved through the secret chain.
//!
//! Every required credential is checked before the bot connects; a missing
//! or blank value is a fatal [`ConfigError`]. Tokens and keys are held as
//! [`SecretString`] and never appear in `Debug` output.

use secrecy::SecretString;

use feelgood_core::service::secret::SecretService;
use feelgood_types::error::ConfigError;
use feelgood_types::secret::{
    DATABASE_URL, DISCORD_BOT_TOKEN, SPOTIFY_CLIENT_ID, SPOTIFY_CLIENT_SECRET, TMDB_API_KEY,
    YOUTUBE_API_KEY,
};

/// All external credentials the bot needs.
#[derive(Debug)]
pub struct Credentials {
    pub discord_token: SecretString,
    pub spotify_client_id: String,
    pub spotify_client_secret: SecretString,
    pub tmdb_api_key: SecretString,
    pub youtube_api_key: SecretString,
    /// Profile database override; the data-dir SQLite file is used when absent.
    pub database_url: Option<String>,
}

impl Credentials {
    /// Resolve every credential, failing on the first one that is missing.
    pub async fn load(secrets: &SecretService) -> Result<Self, ConfigError> {
        let discord_token = secrets.require(DISCORD_BOT_TOKEN).await?;
        let spotify_client_id = secrets.require(SPOTIFY_CLIENT_ID).await?;
        let spotify_client_secret = secrets.require(SPOTIFY_CLIENT_SECRET).await?;
        let tmdb_api_key = secrets.require(TMDB_API_KEY).await?;
        let youtube_api_key = secrets.require(YOUTUBE_API_KEY).await?;

        let database_url = secrets
            .get_secret(DATABASE_URL)
            .await?
            .map(|s| s.value)
            .filter(|url| !url.trim().is_empty());

        Ok(Self {
            discord_token: SecretString::from(discord_token.value),
            spotify_client_id: spotify_client_id.value.trim().to_string(),
            spotify_client_secret: SecretString::from(spotify_client_secret.value),
            tmdb_api_key: SecretString::from(tmdb_api_key.value),
            youtube_api_key: SecretString::from(youtube_api_key.value),
            database_url,
        })
    }
}
