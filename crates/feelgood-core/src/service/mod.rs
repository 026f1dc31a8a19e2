//! Services built on top of the repository ports.

pub mod secret;
