//! CLI command definitions and dispatch for the `cinechat` binary.
//!
//! Uses clap derive macros for argument parsing. The `serve` command runs
//! the REST API; the remaining commands inspect and manage stored
//! conversations from the terminal.

pub mod history;
pub mod session;

use clap::{Parser, Subcommand};
use clap_complete::Shell;

/// Movie-recommendation chat service.
#[derive(Parser)]
#[command(name = "cinechat", version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output machine-readable JSON instead of styled text.
    #[arg(long, global = true)]
    pub json: bool,

    /// Suppress all output except errors.
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Detailed output (-v for verbose, -vv for debug/trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the REST API server.
    Serve {
        /// Port to listen on.
        #[arg(short, long, default_value = "3000")]
        port: u16,

        /// Host to bind to.
        #[arg(long, default_value = "127.0.0.1")]
        host: String,
    },

    /// Show the stored transcript for a session.
    History {
        /// Session identifier (the value of the session cookie).
        session_id: String,
    },

    /// Browse stored sessions.
    #[command(alias = "ls")]
    Sessions,

    /// Delete all messages for a session.
    Clear {
        /// Session identifier to clear.
        session_id: String,

        /// Skip confirmation prompt.
        #[arg(long)]
        force: bool,
    },

    /// Generate shell completions.
    Completions {
        /// Shell to generate completions for.
        shell: Shell,
    },
}
