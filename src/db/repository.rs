//! Database repository for players and the move log.

use diesel::prelude::*;
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};
use tracing::{debug, info, instrument};

use crate::db::{DbError, MoveRow, NewMoveRow, NewPlayerRow, PlayerRow, schema};

const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

/// SQLite-backed repository. Every call opens its own connection.
#[derive(Debug, Clone)]
pub struct GameRepository {
    db_path: String,
}

impl GameRepository {
    /// Creates a repository for the database at the given path without
    /// touching the file.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if the path is empty.
    #[instrument(skip(db_path), fields(db_path = %db_path))]
    pub fn new(db_path: String) -> Result<Self, DbError> {
        if db_path.trim().is_empty() {
            return Err(DbError::new("Database path is empty"));
        }
        info!(path = %db_path, "Creating GameRepository");
        Ok(Self { db_path })
    }

    /// Creates a repository and brings its schema up to date.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if the database cannot be opened or migrated.
    #[instrument(skip(db_path), fields(db_path = %db_path))]
    pub fn open(db_path: String) -> Result<Self, DbError> {
        let repo = Self::new(db_path)?;
        repo.run_migrations()?;
        Ok(repo)
    }

    /// Applies any pending embedded migrations.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if a migration fails.
    #[instrument(skip(self))]
    pub fn run_migrations(&self) -> Result<(), DbError> {
        let mut conn = self.connection()?;
        let applied = conn.run_pending_migrations(MIGRATIONS)?;
        info!(count = applied.len(), "Migrations applied");
        Ok(())
    }

    /// Path of the database file.
    pub fn db_path(&self) -> &str {
        &self.db_path
    }

    #[instrument(skip(self))]
    fn connection(&self) -> Result<SqliteConnection, DbError> {
        debug!(path = %self.db_path, "Establishing connection");
        SqliteConnection::establish(&self.db_path)
            .map_err(|e| DbError::new(format!("Failed to connect to '{}': {}", self.db_path, e)))
    }

    /// Stores a player.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if the name is already taken or a database error occurs.
    #[instrument(skip(self, player))]
    pub fn create_player(&self, player: NewPlayerRow) -> Result<PlayerRow, DbError> {
        let mut conn = self.connection()?;

        let row = diesel::insert_into(schema::players::table)
            .values(&player)
            .returning(PlayerRow::as_returning())
            .get_result(&mut conn)?;

        info!(
            player_id = row.id(),
            name = %row.name(),
            is_white = row.is_white(),
            "Player created"
        );
        Ok(row)
    }

    /// Gets a player by name. Returns `None` if not found.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if a database error occurs.
    #[instrument(skip(self))]
    pub fn get_player_by_name(&self, name: &str) -> Result<Option<PlayerRow>, DbError> {
        let mut conn = self.connection()?;

        let row = schema::players::table
            .filter(schema::players::name.eq(name))
            .first::<PlayerRow>(&mut conn)
            .optional()?;

        debug!(found = row.is_some(), "Player lookup finished");
        Ok(row)
    }

    /// Lists all players in the order they were added.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if a database error occurs.
    #[instrument(skip(self))]
    pub fn list_players(&self) -> Result<Vec<PlayerRow>, DbError> {
        let mut conn = self.connection()?;

        let rows = schema::players::table
            .order(schema::players::id.asc())
            .load::<PlayerRow>(&mut conn)?;

        debug!(count = rows.len(), "Players loaded");
        Ok(rows)
    }

    /// Deletes every player.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if a database error occurs.
    #[instrument(skip(self))]
    pub fn delete_players(&self) -> Result<usize, DbError> {
        let mut conn = self.connection()?;
        let deleted = diesel::delete(schema::players::table).execute(&mut conn)?;
        info!(deleted, "Players cleared");
        Ok(deleted)
    }

    /// Appends one entry to the move log.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if the sequence number is already used or a
    /// database error occurs.
    #[instrument(skip(self, row), fields(sequence = row.sequence(), player = %row.player_name()))]
    pub fn record_move(&self, row: NewMoveRow) -> Result<MoveRow, DbError> {
        let mut conn = self.connection()?;

        let stored = diesel::insert_into(schema::moves::table)
            .values(&row)
            .returning(MoveRow::as_returning())
            .get_result(&mut conn)?;

        debug!(
            move_id = stored.id(),
            start = %stored.start_spot(),
            end = %stored.end_spot(),
            "Move recorded"
        );
        Ok(stored)
    }

    /// Lists the move log in sequence order.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if a database error occurs.
    #[instrument(skip(self))]
    pub fn list_moves(&self) -> Result<Vec<MoveRow>, DbError> {
        let mut conn = self.connection()?;

        let rows = schema::moves::table
            .order(schema::moves::sequence.asc())
            .load::<MoveRow>(&mut conn)?;

        debug!(count = rows.len(), "Moves loaded");
        Ok(rows)
    }

    /// Deletes the whole move log.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if a database error occurs.
    #[instrument(skip(self))]
    pub fn delete_moves(&self) -> Result<usize, DbError> {
        let mut conn = self.connection()?;
        let deleted = diesel::delete(schema::moves::table).execute(&mut conn)?;
        info!(deleted, "Move log cleared");
        Ok(deleted)
    }
}
