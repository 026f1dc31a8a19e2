//! Secret provider implementations.
//!
//! - `env`: Environment variable provider (read-only, highest priority)
//! - `dotenv`: `.env` file provider (read-only, parsed without touching the process env)
//! - `chain`: Secret chain builder wiring the providers together

pub mod chain;
pub mod dotenv;
pub mod env;
