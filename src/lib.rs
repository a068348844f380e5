//! Strictly Checkers library - two-player console checkers with a
//! replayable move log.
//!
//! # Architecture
//!
//! - **Games**: board, movement and capture rules, and the turn engine
//! - **Store**: player and move-log ports with SQLite and in-memory backends
//! - **Session**: console orchestrator over an injected input source
//!
//! # Example
//!
//! ```
//! use strictly_checkers::{Color, Coord, Game, Player, Roster, TurnProgress};
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let roster = Roster::new(vec![
//!     Player::new("Alice", Color::White),
//!     Player::new("Bob", Color::Black),
//! ])?;
//! let mut game = Game::new(roster, 1);
//!
//! let c3 = Coord::from_token("c3").ok_or("bad token")?;
//! let d4 = Coord::from_token("d4").ok_or("bad token")?;
//! let result = game.make_move(c3, d4)?;
//! assert_eq!(*result.progress(), TurnProgress::TurnComplete);
//! assert_eq!(game.current_player().name(), "Bob");
//! # Ok(())
//! # }
//! # example().unwrap();
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Private module declarations
mod config;
mod db;
mod games;
mod input;
mod session;
mod store;

// Crate-level exports - Game types (checkers)
pub use games::checkers::rules;
pub use games::checkers::{
    BOARD_SIZE, Board, BoardError, Color, Coord, DEFAULT_KILL_THRESHOLD, EndReason, Game,
    GameEvent, GameStatus, Move, MoveRejection, MoveResult, Piece, Player, ReplayError, Roster,
    RosterError, Spot, TurnProgress,
};

// Crate-level exports - Persistence
pub use db::{DbError, GameRepository, MoveRow, NewMoveRow, NewPlayerRow, PlayerRow};
pub use store::{
    EventSink, GameStore, MemoryStore, MoveRecorder, MoveStore, PlayerStore, StoreError,
};

// Crate-level exports - Console
pub use config::{CheckersConfig, ConfigError};
pub use input::{
    EXIT_TOKEN, InputSource, LineReader, ScriptedInput, Token, TokenError, parse_token,
};
pub use session::{Session, SessionError, write_log};
