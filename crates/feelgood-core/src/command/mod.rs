//! Chat command parsing and dispatch.
//!
//! - `parser` -- turns raw message text into a [`Command`]
//! - `dispatcher` -- routes commands to the mood and profile flows

pub mod dispatcher;
pub mod parser;

pub use dispatcher::{Dispatcher, InboundMessage};
pub use parser::Command;
