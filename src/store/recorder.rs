//! Turning game events into persisted moves.

use tracing::{debug, info, instrument};

use super::{MoveStore, StoreError};
use crate::GameEvent;

/// Receives the events a game emits.
pub trait EventSink {
    /// Handles one event.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the event could not be recorded.
    fn handle(&mut self, event: &GameEvent) -> Result<(), StoreError>;
}

/// Collects events, mostly for tests.
impl EventSink for Vec<GameEvent> {
    fn handle(&mut self, event: &GameEvent) -> Result<(), StoreError> {
        self.push(event.clone());
        Ok(())
    }
}

/// Appends every applied leg to a [`MoveStore`].
#[derive(Debug)]
pub struct MoveRecorder<'a, M: MoveStore + ?Sized> {
    store: &'a M,
    recorded: usize,
}

impl<'a, M: MoveStore + ?Sized> MoveRecorder<'a, M> {
    /// Creates a recorder writing to `store`.
    pub fn new(store: &'a M) -> Self {
        Self { store, recorded: 0 }
    }

    /// Number of moves written so far.
    pub fn recorded(&self) -> usize {
        self.recorded
    }
}

impl<M: MoveStore + ?Sized> EventSink for MoveRecorder<'_, M> {
    #[instrument(skip(self, event))]
    fn handle(&mut self, event: &GameEvent) -> Result<(), StoreError> {
        match event {
            GameEvent::MoveApplied(record) | GameEvent::CaptureApplied { record, .. } => {
                self.store.add_move(record)?;
                self.recorded += 1;
                debug!(sequence = record.sequence(), "Move persisted");
            }
            GameEvent::GameEnded { winner, reason } => {
                info!(winner = ?winner, reason = %reason, "Game ended");
            }
        }
        Ok(())
    }
}
