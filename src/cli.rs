//! Command-line interface for strictly_checkers.

use clap::{Parser, Subcommand};

/// Strictly Checkers - two-player console checkers with a saved move log
#[derive(Parser, Debug)]
#[command(name = "strictly_checkers")]
#[command(about = "Two-player console checkers with a replayable move log", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Path to the TOML configuration file
    #[arg(short, long, global = true, default_value = "checkers.toml")]
    pub config: std::path::PathBuf,

    /// Database file (overrides the config file)
    #[arg(long, global = true)]
    pub db_path: Option<String>,

    /// Captures that end the game (overrides the config file)
    #[arg(long, global = true)]
    pub kill_threshold: Option<u32>,

    /// Keep players and moves in memory only
    #[arg(long, global = true)]
    pub ephemeral: bool,

    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Forget the saved game, name two players and start playing
    New,

    /// Rebuild the saved game from its move log and keep playing
    Continue,

    /// Print the saved players and move log
    Log {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
}
