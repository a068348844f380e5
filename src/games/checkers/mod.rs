//! Checkers: board, rules and turn engine.

mod board;
mod error;
mod game;
mod types;

pub mod rules;

pub use board::Board;
pub use error::{BoardError, MoveRejection, ReplayError, RosterError};
pub use game::{DEFAULT_KILL_THRESHOLD, EndReason, Game, GameEvent, MoveResult, TurnProgress};
pub use types::{BOARD_SIZE, Color, Coord, GameStatus, Move, Piece, Player, Roster, Spot};
