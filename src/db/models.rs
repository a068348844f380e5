//! Database rows and their mapping to domain types.

use chrono::NaiveDateTime;
use derive_getters::Getters;
use derive_new::new;
use diesel::prelude::*;
use tracing::instrument;

use crate::db::{DbError, schema};
use crate::{Color, Coord, Move, Player};

/// Stored player.
#[derive(Debug, Clone, Queryable, Identifiable, Selectable, Getters)]
#[diesel(table_name = schema::players)]
pub struct PlayerRow {
    id: i32,
    name: String,
    is_white: bool,
    created_at: NaiveDateTime,
}

impl PlayerRow {
    /// Rehydrates the domain player. Capture counts are not stored; they are
    /// rebuilt by replaying the move log.
    pub fn to_player(&self) -> Player {
        Player::new(&self.name, Color::from_is_white(self.is_white))
    }
}

/// Insertable player.
#[derive(Debug, Clone, Insertable, new)]
#[diesel(table_name = schema::players)]
pub struct NewPlayerRow {
    name: String,
    is_white: bool,
}

impl From<&Player> for NewPlayerRow {
    fn from(player: &Player) -> Self {
        Self::new(player.name().clone(), player.is_white())
    }
}

/// Stored move log entry. Spots are kept as lower-case tokens such as `"c3"`.
#[derive(Debug, Clone, Queryable, Identifiable, Selectable, Getters)]
#[diesel(table_name = schema::moves)]
pub struct MoveRow {
    id: i32,
    sequence: i32,
    player_name: String,
    start_spot: String,
    end_spot: String,
    is_white: bool,
}

impl MoveRow {
    /// Parses the row back into a domain move.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if the sequence number is negative or a spot is
    /// not a valid token.
    #[instrument(skip(self), fields(id = self.id, sequence = self.sequence))]
    pub fn to_move(&self) -> Result<Move, DbError> {
        let sequence =
            u32::try_from(self.sequence).map_err(|_| DbError::corrupt("sequence", self.sequence))?;
        let start = Coord::from_token(&self.start_spot)
            .ok_or_else(|| DbError::corrupt("start_spot", &self.start_spot))?;
        let end = Coord::from_token(&self.end_spot)
            .ok_or_else(|| DbError::corrupt("end_spot", &self.end_spot))?;
        Ok(Move::new(
            sequence,
            self.player_name.clone(),
            start,
            end,
            self.is_white,
        ))
    }
}

/// Insertable move log entry.
#[derive(Debug, Clone, Insertable, new, Getters)]
#[diesel(table_name = schema::moves)]
pub struct NewMoveRow {
    sequence: i32,
    player_name: String,
    start_spot: String,
    end_spot: String,
    is_white: bool,
}

impl TryFrom<&Move> for NewMoveRow {
    type Error = DbError;

    fn try_from(record: &Move) -> Result<Self, Self::Error> {
        let sequence = i32::try_from(*record.sequence())
            .map_err(|_| DbError::corrupt("sequence", record.sequence()))?;
        Ok(Self::new(
            sequence,
            record.player_name().clone(),
            record.start().to_token(),
            record.end().to_token(),
            *record.is_white(),
        ))
    }
}
