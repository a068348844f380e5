//! Database persistence layer for players and the move log.

mod error;
mod models;
mod repository;
mod schema; // Diesel generated schema - internal use only

pub use error::DbError;
pub use models::{MoveRow, NewMoveRow, NewPlayerRow, PlayerRow};
pub use repository::GameRepository;
