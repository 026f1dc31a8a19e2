//! Bot configuration types.
//!
//! `BotConfig` represents the optional `config.toml` in the data directory
//! that tunes provider lookups and reply formatting.

use serde::{Deserialize, Serialize};

/// Hard message size limit enforced by the chat platform, in characters.
pub const PLATFORM_MESSAGE_LIMIT: usize = 2000;

/// Upper bound for `results_per_category`.
pub const MAX_RESULTS_PER_CATEGORY: usize = 10;

/// Top-level settings for the bot.
///
/// Loaded from `~/.feelgood/config.toml`. All fields have sensible defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BotConfig {
    /// Timeout applied to each provider lookup, in seconds.
    #[serde(default = "default_provider_timeout_secs")]
    pub provider_timeout_secs: u64,

    /// How many items each provider is asked for.
    #[serde(default = "default_results_per_category")]
    pub results_per_category: usize,

    /// Maximum characters per outbound message.
    #[serde(default = "default_max_message_chars")]
    pub max_message_chars: usize,

    /// Optional ISO 3166-1 market code passed to the music provider.
    #[serde(default)]
    pub spotify_market: Option<String>,
}

fn default_provider_timeout_secs() -> u64 {
    10
}

fn default_results_per_category() -> usize {
    1
}

fn default_max_message_chars() -> usize {
    PLATFORM_MESSAGE_LIMIT
}

impl Default for BotConfig {
    fn default() -> Self {
        Self {
            provider_timeout_secs: default_provider_timeout_secs(),
            results_per_category: default_results_per_category(),
            max_message_chars: default_max_message_chars(),
            spotify_market: None,
        }
    }
}

impl BotConfig {
    /// Clamp user-supplied values into the ranges the bot can honor.
    ///
    /// `max_message_chars` never exceeds the platform limit and every count
    /// is at least 1.
    pub fn normalized(mut self) -> Self {
        self.provider_timeout_secs = self.provider_timeout_secs.max(1);
        self.results_per_category = self
            .results_per_category
            .clamp(1, MAX_RESULTS_PER_CATEGORY);
        self.max_message_chars = self.max_message_chars.clamp(1, PLATFORM_MESSAGE_LIMIT);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bot_config_default_values() {
        let config = BotConfig::default();
        assert_eq!(config.provider_timeout_secs, 10);
        assert_eq!(config.results_per_category, 1);
        assert_eq!(config.max_message_chars, 2000);
        assert!(config.spotify_market.is_none());
    }

    #[test]
    fn test_bot_config_deserialize_with_defaults() {
        let config: BotConfig = toml::from_str("").unwrap();
        assert_eq!(config, BotConfig::default());
    }

    #[test]
    fn test_bot_config_deserialize_with_values() {
        let toml_str = r#"
provider_timeout_secs = 3
results_per_category = 5
max_message_chars = 1500
spotify_market = "GB"
"#;
        let config: BotConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.provider_timeout_secs, 3);
        assert_eq!(config.results_per_category, 5);
        assert_eq!(config.max_message_chars, 1500);
        assert_eq!(config.spotify_market.as_deref(), Some("GB"));
    }

    #[test]
    fn test_normalized_clamps_out_of_range_values() {
        let config = BotConfig {
            provider_timeout_secs: 0,
            results_per_category: 50,
            max_message_chars: 4000,
            spotify_market: None,
        }
        .normalized();
        assert_eq!(config.provider_timeout_secs, 1);
        assert_eq!(config.results_per_category, MAX_RESULTS_PER_CATEGORY);
        assert_eq!(config.max_message_chars, PLATFORM_MESSAGE_LIMIT);

        let config = BotConfig {
            results_per_category: 0,
            max_message_chars: 0,
            ..BotConfig::default()
        }
        .normalized();
        assert_eq!(config.results_per_category, 1);
        assert_eq!(config.max_message_chars, 1);
    }
}
