//! Startup configuration loader for FeelGood Bot.
//!
//! Reads `config.toml` from the data directory (`~/.feelgood/` in production)
//! and deserializes it into [`BotConfig`]. Falls back to defaults when the
//! file is missing or malformed.

use std::path::{Path, PathBuf};

use feelgood_types::config::BotConfig;

/// Environment variable that overrides the data directory.
pub const DATA_DIR_ENV: &str = "FEELGOOD_DATA_DIR";

/// Resolve the data directory.
///
/// Order: `FEELGOOD_DATA_DIR`, then `~/.feelgood`, then `./.feelgood`.
pub fn resolve_data_dir() -> PathBuf {
    if let Ok(dir) = std::env::var(DATA_DIR_ENV) {
        if !dir.trim().is_empty() {
            return PathBuf::from(dir);
        }
    }

    if let Some(home) = dirs::home_dir() {
        return home.join(".feelgood");
    }

    PathBuf::from(".feelgood")
}

/// Load bot configuration from `{data_dir}/config.toml`.
///
/// - Missing file: [`BotConfig::default()`].
/// - Unreadable or unparsable file: logs a warning and returns the default.
///
/// The result is always normalized.
pub async fn load_bot_config(data_dir: &Path) -> BotConfig {
    let config_path = data_dir.join("config.toml");

    let content = match tokio::fs::read_to_string(&config_path).await {
        Ok(content) => content,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!("No config.toml found at {}, using defaults", config_path.display());
            return BotConfig::default();
        }
        Err(err) => {
            tracing::warn!("Failed to read {}: {err}, using defaults", config_path.display());
            return BotConfig::default();
        }
    };

    match toml::from_str::<BotConfig>(&content) {
        Ok(config) => config.normalized(),
        Err(err) => {
            tracing::warn!(
                "Failed to parse {}: {err}, using defaults",
                config_path.display()
            );
            BotConfig::default()
        }
    }
}
