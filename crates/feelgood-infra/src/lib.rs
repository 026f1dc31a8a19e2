//! Infrastructure layer for FeelGood Bot.
//!
//! Contains implementations of the port traits defined in `feelgood-core`:
//! SQLite profile storage, the environment/`.env` secret chain, startup
//! configuration loading, and the Spotify, TMDb and YouTube HTTP adapters.

pub mod config;
pub mod credentials;
pub mod provider;
pub mod secret;
pub mod sqlite;
