//! Strictly Checkers - console entry point.

#![warn(missing_docs)]

mod cli;

use std::io::Write;

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Command};
use strictly_checkers::{
    CheckersConfig, GameRepository, GameStore, LineReader, MemoryStore, Session, write_log,
};
use tracing::{info, instrument};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    initialize_tracing();

    let config = load_config(&cli)?;

    if cli.ephemeral {
        let store = MemoryStore::new();
        run(&cli.command, &store, config)
    } else {
        let store = GameRepository::open(config.db_path().clone())?;
        run(&cli.command, &store, config)
    }
}

/// Logs go to stderr so they never interleave with the game on stdout.
fn initialize_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("warn,strictly_checkers=info")),
        )
        .with_writer(std::io::stderr)
        .init();
}

#[instrument(skip(cli), fields(config_path = %cli.config.display()))]
fn load_config(cli: &Cli) -> Result<CheckersConfig> {
    let mut config = CheckersConfig::load_or_default(&cli.config)?;
    if let Some(db_path) = &cli.db_path {
        info!(db_path = %db_path, "Overriding database path");
        config = config.with_db_path(db_path.clone());
    }
    if let Some(threshold) = cli.kill_threshold {
        info!(threshold, "Overriding kill threshold");
        config = config.with_kill_threshold(threshold)?;
    }
    Ok(config)
}

#[instrument(skip(store, config))]
fn run<S: GameStore + ?Sized>(
    command: &Command,
    store: &S,
    config: CheckersConfig,
) -> Result<()> {
    let stdin = std::io::stdin();
    let stdout = std::io::stdout();

    match command {
        Command::New => {
            let mut session = Session::new(
                LineReader::new(stdin.lock()),
                stdout.lock(),
                store,
                config,
            );
            session.new_game()?;
            session.play()?;
        }
        Command::Continue => {
            let mut session = Session::new(
                LineReader::new(stdin.lock()),
                stdout.lock(),
                store,
                config,
            );
            session.continue_game()?;
            session.play()?;
        }
        Command::Log { json } => {
            let mut out = stdout.lock();
            write_log(store, &mut out, *json)?;
            out.flush()?;
        }
    }
    Ok(())
}
