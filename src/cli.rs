//! Command-line interface for strictly_duel.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use strictly_duel::PlayerKind;

/// Strictly Duel - peer-to-peer tic-tac-toe over TCP
#[derive(Parser, Debug)]
#[command(name = "strictly_duel")]
#[command(about = "Play tic-tac-toe against a peer, with no server in between", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Path to the TOML config file (missing file means defaults)
    #[arg(short, long, global = true, default_value = "duel.toml")]
    pub config: PathBuf,

    /// Who makes the local moves (overrides the config file)
    #[arg(long, global = true, value_enum)]
    pub player: Option<PlayerKind>,

    /// Disable terminal colors
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Wait for a peer to connect, then play
    Listen {
        /// Host to bind to
        #[arg(long)]
        host: Option<String>,

        /// Port to bind to
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Connect to a listening peer, then play
    Connect {
        /// Host to connect to
        #[arg(long)]
        host: Option<String>,

        /// Port to connect to
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Play locally against the simple AI
    Practice,
}

impl Command {
    /// Host and port given on the command line, if any.
    pub fn endpoint(&self) -> (Option<&str>, Option<u16>) {
        match self {
            Command::Listen { host, port } | Command::Connect { host, port } => {
                (host.as_deref(), *port)
            }
            Command::Practice => (None, None),
        }
    }
}
