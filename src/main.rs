//! Strictly Duel - command-line entry point
//!
//! Loads the config, sets up logging and plays one game.

#![warn(missing_docs)]

mod cli;

use std::fs::OpenOptions;
use std::io;
use std::process::ExitCode;
use std::sync::Mutex;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, Command};
use strictly_duel::{
    ConsoleView, DuelConfig, Ending, HumanPlayer, Player, PlayerKind, SimpleAi, connect, listen,
    practice,
};
use tracing::{info, instrument};
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    // Load .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

/// Applies the command line on top of the config file.
fn load_config(cli: &Cli) -> Result<DuelConfig> {
    let mut config = DuelConfig::load_or_default(&cli.config)?;

    let (host, port) = cli.command.endpoint();
    if let Some(host) = host {
        config = config.with_host(host);
    }
    if let Some(port) = port {
        config = config.with_port(port);
    }
    if let Some(player) = cli.player {
        config = config.with_player(player);
    }
    if cli.no_color {
        config = config.without_color();
    }
    Ok(config)
}

/// Sets up tracing: `RUST_LOG` wins, else the configured filter.
fn initialize_tracing(config: &DuelConfig) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_filter()))
        .context("Invalid log filter")?;

    match config.log_file() {
        Some(path) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("Failed to open log file {}", path.display()))?;
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .init();
        }
        None => {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(io::stderr)
                .init();
        }
    }
    Ok(())
}

#[instrument(skip_all, fields(command = ?cli.command))]
fn run(cli: Cli) -> Result<()> {
    let config = load_config(&cli)?;
    initialize_tracing(&config)?;
    info!(?config, "Starting Strictly Duel");

    let ai_delay = Duration::from_millis(*config.ai_delay_ms());
    let mut player: Box<dyn Player> = match config.player() {
        PlayerKind::Human => Box::new(HumanPlayer::new("You", io::stdin().lock(), io::stdout())),
        PlayerKind::Ai => Box::new(SimpleAi::new("Simple AI", ai_delay)),
    };
    let mut view = ConsoleView::new(io::stdout(), *config.color());

    println!("*** Welcome to Strictly Duel ***");
    let ending = match cli.command {
        Command::Listen { .. } => {
            println!("Listening on port {}...", config.port());
            listen(config.address(), player.as_mut(), &mut view)?
        }
        Command::Connect { .. } => {
            println!("Connecting to {}...", config.address());
            connect(config.address(), player.as_mut(), &mut view)?
        }
        Command::Practice => {
            println!("Practicing against the simple AI...");
            practice(player.as_mut(), &mut view, ai_delay)?
        }
    };

    match ending {
        Ending::Finished(result) => info!(%result, "Game finished"),
        Ending::Quit => info!("Player quit"),
    }
    Ok(())
}
