//! Storage ports for players and the move log.
//!
//! The game core only talks to these traits. [`GameRepository`] backs them
//! with SQLite and [`MemoryStore`] keeps everything in process.
//!
//! [`GameRepository`]: crate::GameRepository

mod memory;
mod recorder;
mod sqlite;

pub use memory::MemoryStore;
pub use recorder::{EventSink, MoveRecorder};

use crate::{DbError, Move, Player};

/// Error raised by any store. Store failures end the session.
pub type StoreError = DbError;

/// Keeps the players of the current game, keyed by unique name.
pub trait PlayerStore {
    /// Looks a player up by name.
    fn get_by_name(&self, name: &str) -> Result<Option<Player>, StoreError>;

    /// Adds a player. Names must be unique.
    fn add_player(&self, player: &Player) -> Result<(), StoreError>;

    /// All players in insertion order.
    fn all_players(&self) -> Result<Vec<Player>, StoreError>;

    /// Removes every player.
    fn reset_players(&self) -> Result<(), StoreError>;
}

/// Append-only log of applied moves.
pub trait MoveStore {
    /// Appends a move.
    fn add_move(&self, record: &Move) -> Result<(), StoreError>;

    /// All moves ordered by sequence number.
    fn all_moves(&self) -> Result<Vec<Move>, StoreError>;

    /// Removes every move.
    fn reset_moves(&self) -> Result<(), StoreError>;
}

/// A store that holds both players and moves.
pub trait GameStore: PlayerStore + MoveStore {}

impl<T: PlayerStore + MoveStore> GameStore for T {}
