//! CLI definitions for the `feelgood` binary.
//!
//! Every flag can also be supplied through the environment so the bot can be
//! configured entirely from a container or service manager.

pub mod check;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Mood-based music, movie and video recommendations for Discord.
#[derive(Parser, Debug)]
#[command(name = "feelgood", version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Only log errors.
    #[arg(short, long, global = true, env = "FEELGOOD_QUIET")]
    pub quiet: bool,

    /// More log output (-v for debug, -vv for trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Directory holding config.toml, .env and the profile database.
    #[arg(long, global = true, env = "FEELGOOD_DATA_DIR")]
    pub data_dir: Option<PathBuf>,

    /// Export tracing spans through OpenTelemetry (stdout exporter).
    #[arg(long, global = true, env = "FEELGOOD_OTEL")]
    pub otel: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Connect to Discord and answer commands (default).
    Run,

    /// Validate credentials and configuration, then exit.
    CheckConfig {
        /// Output machine-readable JSON instead of styled text.
        #[arg(long)]
        json: bool,
    },
}

impl Cli {
    /// Default log filter used when `RUST_LOG` is not set.
    pub fn log_filter(&self) -> &'static str {
        match self.verbose {
            0 if self.quiet => "error",
            0 => "info",
            1 => "info,feelgood=debug,feelgood_core=debug,feelgood_infra=debug",
            _ => "trace",
        }
    }

    /// The subcommand to run; `run` when none was given.
    pub fn resolved_command(&self) -> Commands {
        self.command.clone().unwrap_or(Commands::Run)
    }
}
