//! Business logic and port trait definitions for FeelGood Bot.
//!
//! This crate defines the "ports" (profile store, secret provider and
//! recommendation provider traits) that the infrastructure layer implements,
//! plus the mood resolver, recommendation aggregation, reply formatting and
//! command dispatch. It depends only on `feelgood-types` -- never on
//! `feelgood-infra` or any database/IO crate.

pub mod command;
pub mod format;
pub mod mood;
pub mod provider;
pub mod recommend;
pub mod repository;
pub mod service;
