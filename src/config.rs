//! Configuration file for the console game.

use derive_getters::Getters;
use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, info, instrument};

use crate::DEFAULT_KILL_THRESHOLD;

/// Settings read from `checkers.toml`. Missing keys take their defaults.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
pub struct CheckersConfig {
    /// SQLite database file holding players and the move log.
    #[serde(default = "default_db_path")]
    db_path: String,

    /// Capture count that ends the game when a player's turn lands exactly on it.
    #[serde(default = "default_kill_threshold")]
    kill_threshold: u32,

    /// Print the board after every applied move.
    #[serde(default = "default_show_board")]
    show_board: bool,
}

fn default_db_path() -> String {
    "checkers.db".to_string()
}

fn default_kill_threshold() -> u32 {
    DEFAULT_KILL_THRESHOLD
}

fn default_show_board() -> bool {
    true
}

impl Default for CheckersConfig {
    fn default() -> Self {
        Self {
            db_path: default_db_path(),
            kill_threshold: default_kill_threshold(),
            show_board: default_show_board(),
        }
    }
}

impl CheckersConfig {
    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the file cannot be read, is not valid TOML,
    /// or holds invalid values.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading config from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(format!("Failed to read config file: {}", e)))?;
        let config = Self::from_toml(&content)?;
        info!(db_path = %config.db_path, kill_threshold = config.kill_threshold, "Config loaded");
        Ok(config)
    }

    /// Parses configuration from TOML text.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the text is not valid TOML or holds
    /// invalid values.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)
            .map_err(|e| ConfigError::new(format!("Failed to parse config: {}", e)))?;
        config.validate()
    }

    /// Loads the file if it exists, otherwise returns the defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the file exists but cannot be loaded.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn load_or_default(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        if path.as_ref().exists() {
            Self::from_file(path)
        } else {
            info!("Config file not found, using defaults");
            Ok(Self::default())
        }
    }

    /// Overrides the database path.
    pub fn with_db_path(mut self, db_path: impl Into<String>) -> Self {
        self.db_path = db_path.into();
        self
    }

    /// Overrides the kill threshold.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if `kill_threshold` is zero.
    pub fn with_kill_threshold(mut self, kill_threshold: u32) -> Result<Self, ConfigError> {
        self.kill_threshold = kill_threshold;
        self.validate()
    }

    /// Overrides whether the board is printed after each move.
    pub fn with_show_board(mut self, show_board: bool) -> Self {
        self.show_board = show_board;
        self
    }

    fn validate(self) -> Result<Self, ConfigError> {
        if self.kill_threshold == 0 {
            return Err(ConfigError::new("kill_threshold must be at least 1"));
        }
        Ok(self)
    }
}

/// Configuration error.
#[derive(Debug, Clone, Display, Error)]
#[display("Config error: {} at {}:{}", message, file, line)]
pub struct ConfigError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ConfigError {
    /// Creates a new configuration error.
    #[track_caller]
    pub fn new(message: impl Into<String>) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message: message.into(),
            line: loc.line(),
            file: loc.file(),
        }
    }
}
