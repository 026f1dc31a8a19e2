//! Shared domain types for FeelGood Bot.
//!
//! This crate contains the domain types used across the workspace:
//! user profiles, mood queries, recommendation items, configuration,
//! and their associated error types.
//!
//! Zero infrastructure dependencies -- only serde, chrono, thiserror.

pub mod config;
pub mod error;
pub mod mood;
pub mod profile;
pub mod recommendation;
pub mod secret;
