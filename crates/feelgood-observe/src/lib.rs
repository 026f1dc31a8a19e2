//! Observability setup for FeelGood Bot.

pub mod tracing_setup;
