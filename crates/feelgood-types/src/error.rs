use thiserror::Error;

/// Errors from repository operations (used by trait definitions in feelgood-core).
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("database connection error")]
    Connection,

    #[error("query error: {0}")]
    Query(String),

    #[error("entity not found")]
    NotFound,

    #[error("conflict: {0}")]
    Conflict(String),
}

/// Errors from a recommendation provider lookup.
///
/// These never leave the recommendation service: every variant is logged
/// and degraded to an empty result there.
#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("HTTP request failed: {message}")]
    Http { message: String },

    #[error("authentication failed: {0}")]
    AuthenticationFailed(String),

    #[error("rate limited")]
    RateLimited,

    #[error("unexpected status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("deserialization error: {0}")]
    Deserialization(String),

    #[error("unknown genre '{0}'")]
    UnknownGenre(String),

    #[error("timed out after {0} ms")]
    Timeout(u64),
}

/// Errors raised while assembling startup configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required secret '{0}'")]
    MissingSecret(String),

    #[error("secret '{0}' is empty")]
    EmptySecret(String),

    #[error("secret lookup failed: {0}")]
    Lookup(#[from] RepositoryError),
}
