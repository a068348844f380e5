//! Store ports backed by [`GameRepository`].

use tracing::instrument;

use super::{MoveStore, PlayerStore, StoreError};
use crate::{GameRepository, Move, NewMoveRow, NewPlayerRow, Player};

impl PlayerStore for GameRepository {
    fn get_by_name(&self, name: &str) -> Result<Option<Player>, StoreError> {
        Ok(self.get_player_by_name(name)?.map(|row| row.to_player()))
    }

    #[instrument(skip(self, player), fields(name = %player.name()))]
    fn add_player(&self, player: &Player) -> Result<(), StoreError> {
        self.create_player(NewPlayerRow::from(player))?;
        Ok(())
    }

    fn all_players(&self) -> Result<Vec<Player>, StoreError> {
        Ok(self
            .list_players()?
            .iter()
            .map(|row| row.to_player())
            .collect())
    }

    fn reset_players(&self) -> Result<(), StoreError> {
        self.delete_players()?;
        Ok(())
    }
}

impl MoveStore for GameRepository {
    #[instrument(skip(self, record), fields(sequence = record.sequence()))]
    fn add_move(&self, record: &Move) -> Result<(), StoreError> {
        self.record_move(NewMoveRow::try_from(record)?)?;
        Ok(())
    }

    fn all_moves(&self) -> Result<Vec<Move>, StoreError> {
        self.list_moves()?.iter().map(|row| row.to_move()).collect()
    }

    fn reset_moves(&self) -> Result<(), StoreError> {
        self.delete_moves()?;
        Ok(())
    }
}
