//! In-process store.

use std::cell::RefCell;

use tracing::{debug, instrument};

use super::{MoveStore, PlayerStore, StoreError};
use crate::{Move, Player};

/// Keeps players and moves in memory. Nothing survives the process.
#[derive(Debug, Default)]
pub struct MemoryStore {
    players: RefCell<Vec<Player>>,
    moves: RefCell<Vec<Move>>,
}

impl MemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store holding a previous game.
    pub fn with_contents(players: Vec<Player>, moves: Vec<Move>) -> Self {
        Self {
            players: RefCell::new(players),
            moves: RefCell::new(moves),
        }
    }
}

impl PlayerStore for MemoryStore {
    fn get_by_name(&self, name: &str) -> Result<Option<Player>, StoreError> {
        Ok(self
            .players
            .borrow()
            .iter()
            .find(|p| p.name() == name)
            .cloned())
    }

    #[instrument(skip(self, player), fields(name = %player.name()))]
    fn add_player(&self, player: &Player) -> Result<(), StoreError> {
        if self.get_by_name(player.name())?.is_some() {
            return Err(StoreError::new(format!(
                "Player '{}' already exists",
                player.name()
            )));
        }
        self.players.borrow_mut().push(player.clone());
        debug!("Player stored in memory");
        Ok(())
    }

    fn all_players(&self) -> Result<Vec<Player>, StoreError> {
        Ok(self.players.borrow().clone())
    }

    fn reset_players(&self) -> Result<(), StoreError> {
        self.players.borrow_mut().clear();
        Ok(())
    }
}

impl MoveStore for MemoryStore {
    #[instrument(skip(self, record), fields(sequence = record.sequence()))]
    fn add_move(&self, record: &Move) -> Result<(), StoreError> {
        let mut moves = self.moves.borrow_mut();
        if moves.iter().any(|m| m.sequence() == record.sequence()) {
            return Err(StoreError::new(format!(
                "Move #{} already recorded",
                record.sequence()
            )));
        }
        moves.push(record.clone());
        Ok(())
    }

    fn all_moves(&self) -> Result<Vec<Move>, StoreError> {
        let mut moves = self.moves.borrow().clone();
        moves.sort_by_key(|m| *m.sequence());
        Ok(moves)
    }

    fn reset_moves(&self) -> Result<(), StoreError> {
        self.moves.borrow_mut().clear();
        Ok(())
    }
}
