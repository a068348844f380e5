//! Turn engine for checkers.
//!
//! [`Game`] owns the board and the roster and is the only place where moves
//! are judged and applied. Live play and log replay both go through
//! [`Game::make_move`], so a replayed log rebuilds exactly the position the
//! live session produced. Each applied leg yields [`GameEvent`]s for the
//! caller to persist; the engine itself never touches storage.

use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, warn};

use super::board::Board;
use super::error::{MoveRejection, ReplayError};
use super::rules::{
    can_move, capture_target, has_any_move, has_kill, is_end_spot_valid, kill_enemy_piece,
};
use super::types::{Coord, GameStatus, Move, Player, Roster};

/// Captures needed to end the game unless configured otherwise.
pub const DEFAULT_KILL_THRESHOLD: u32 = 1;

/// Why a game ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display)]
pub enum EndReason {
    /// A player's capture count reached the threshold.
    KillThreshold,
    /// The side to move had no legal move.
    NoMovesLeft,
    /// The game was left with `exit`.
    Abandoned,
}

/// Something that happened in the game and may need to be recorded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    /// A simple move was applied.
    MoveApplied(Move),
    /// A capture was applied; `captured` is the spot that was cleared.
    CaptureApplied {
        /// The applied leg.
        record: Move,
        /// Spot of the removed piece.
        captured: Coord,
    },
    /// The game reached its terminal state.
    GameEnded {
        /// Name of the winning player, if there is one.
        winner: Option<String>,
        /// What ended the game.
        reason: EndReason,
    },
}

impl GameEvent {
    /// The move log entry carried by this event, if any.
    pub fn record(&self) -> Option<&Move> {
        match self {
            GameEvent::MoveApplied(record) | GameEvent::CaptureApplied { record, .. } => {
                Some(record)
            }
            GameEvent::GameEnded { .. } => None,
        }
    }
}

/// Where the turn stands after an applied leg.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TurnProgress {
    /// The turn is over; the other player (or nobody, if the game ended) is up.
    TurnComplete,
    /// The same player must capture again with the piece on this spot.
    ChainContinues(Coord),
}

/// Outcome of an accepted leg.
#[derive(Debug, Clone, PartialEq, Eq, Getters)]
pub struct MoveResult {
    events: Vec<GameEvent>,
    progress: TurnProgress,
}

impl MoveResult {
    /// Consumes the result, returning its events.
    pub fn into_events(self) -> Vec<GameEvent> {
        self.events
    }
}

/// A game of checkers between two players.
#[derive(Debug, Clone)]
pub struct Game {
    board: Board,
    roster: Roster,
    status: GameStatus,
    move_counter: u32,
    chain_from: Option<Coord>,
    kill_threshold: u32,
    end_reason: Option<EndReason>,
}

impl Game {
    /// Starts a game from the standard opening position. White moves first.
    #[instrument(skip(roster))]
    pub fn new(roster: Roster, kill_threshold: u32) -> Self {
        let mut board = Board::new();
        board.reset_board();
        Self::with_board(roster, board, kill_threshold)
    }

    /// Starts a game from an arbitrary position.
    pub fn with_board(roster: Roster, board: Board, kill_threshold: u32) -> Self {
        Self {
            board,
            roster,
            status: GameStatus::Active,
            move_counter: 0,
            chain_from: None,
            kill_threshold,
            end_reason: None,
        }
    }

    /// Rebuilds a game by replaying a move log from the opening position.
    ///
    /// Moves are applied with the same rules as live play. Turn boundaries
    /// are not stored: after a capture, the mover keeps the turn for the
    /// next entry exactly when that piece can capture again.
    ///
    /// # Errors
    ///
    /// Returns [`ReplayError`] if the players do not form a roster or if any
    /// logged move is out of order, made by the wrong side, or illegal.
    #[instrument(skip(players, moves), fields(moves = moves.len()))]
    pub fn replay(
        players: Vec<Player>,
        moves: &[Move],
        kill_threshold: u32,
    ) -> Result<Self, ReplayError> {
        let fresh = players
            .into_iter()
            .map(|p| Player::new(p.name(), *p.color()))
            .collect();
        let mut game = Self::new(Roster::new(fresh)?, kill_threshold);

        let mut previous = 0;
        for logged in moves {
            let sequence = *logged.sequence();
            if sequence <= previous {
                return Err(ReplayError::OutOfOrder { sequence, previous });
            }
            let expected = *game.current_player().color();
            if logged.color() != expected {
                return Err(ReplayError::WrongSide {
                    sequence,
                    logged: logged.color(),
                    expected,
                });
            }
            if logged.player_name() != game.current_player().name() {
                warn!(
                    sequence,
                    logged = %logged.player_name(),
                    current = %game.current_player().name(),
                    "Logged player name differs from the player on turn"
                );
            }

            game.make_move(*logged.start(), *logged.end())
                .map_err(|rejection| ReplayError::Refused {
                    sequence,
                    rejection,
                })?;
            game.move_counter = sequence;
            previous = sequence;
        }

        info!(
            moves = moves.len(),
            status = %game.status,
            to_move = %game.current_player().name(),
            "Game reconstructed from log"
        );
        Ok(game)
    }

    /// The board.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Both players and whose turn it is.
    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    /// The player to move.
    pub fn current_player(&self) -> &Player {
        self.roster.current()
    }

    /// Game status.
    pub fn status(&self) -> GameStatus {
        self.status
    }

    /// True until the game ends.
    pub fn is_active(&self) -> bool {
        self.status == GameStatus::Active
    }

    /// Sequence number of the last applied leg.
    pub fn move_counter(&self) -> u32 {
        self.move_counter
    }

    /// The piece that must keep capturing, while a chain is in progress.
    pub fn chain_from(&self) -> Option<Coord> {
        self.chain_from
    }

    /// Capture count that ends the game when a turn finishes exactly on it.
    pub fn kill_threshold(&self) -> u32 {
        self.kill_threshold
    }

    /// Why the game ended, once it has.
    pub fn end_reason(&self) -> Option<EndReason> {
        self.end_reason
    }

    /// Checks that the current player may start a move from `start`.
    ///
    /// # Errors
    ///
    /// Returns [`MoveRejection`] if the game is over, a chain must continue
    /// elsewhere, `start` is not the player's piece, or that piece is stuck.
    pub fn validate_start_spot(&self, start: Coord) -> Result<(), MoveRejection> {
        self.check_source(start)?;
        let color = *self.current_player().color();
        if !can_move(&self.board, color, start) {
            return Err(MoveRejection::NoLegalMove(start));
        }
        Ok(())
    }

    fn check_source(&self, start: Coord) -> Result<(), MoveRejection> {
        if !self.is_active() {
            return Err(MoveRejection::GameOver);
        }
        if let Some(from) = self.chain_from
            && from != start
        {
            return Err(MoveRejection::MustContinueChain(from));
        }
        match self.board.get_piece(start.x(), start.y()) {
            Ok(piece) if piece.color() == *self.current_player().color() => Ok(()),
            _ => Err(MoveRejection::NotYourPiece(start)),
        }
    }

    /// Applies one leg for the current player.
    ///
    /// A simple forward step is tried first, then a capture. A capture that
    /// leaves the piece able to capture again keeps the turn with the same
    /// player ([`TurnProgress::ChainContinues`]); while a chain is open only
    /// captures by that piece are accepted.
    ///
    /// # Errors
    ///
    /// Returns [`MoveRejection`] and leaves the game unchanged if the leg is
    /// not allowed.
    #[instrument(
        skip(self),
        fields(player = %self.current_player().name(), start = %start, end = %end)
    )]
    pub fn make_move(&mut self, start: Coord, end: Coord) -> Result<MoveResult, MoveRejection> {
        self.check_source(start)?;
        if !self.board.is_empty(end.x(), end.y()).unwrap_or(false) {
            debug!("Destination occupied");
            return Err(MoveRejection::DestinationOccupied(end));
        }

        let color = *self.current_player().color();
        let illegal = MoveRejection::Illegal { start, end };
        let mut events = Vec::new();

        if self.chain_from.is_none() && is_end_spot_valid(&self.board, color, start, end) {
            self.board
                .set_spots_after_move(start, end)
                .map_err(|_| illegal.clone())?;
            let record = self.record(start, end);
            info!(sequence = *record.sequence(), "Move applied");
            events.push(GameEvent::MoveApplied(record));
            self.finish_turn(&mut events);
            return Ok(MoveResult {
                events,
                progress: TurnProgress::TurnComplete,
            });
        }

        if !has_kill(&self.board, color, start) {
            debug!("No simple move and no capture available");
            return Err(illegal);
        }
        let Some(captured) = capture_target(&self.board, color, start, end) else {
            debug!("Destination is not a capture landing");
            return Err(illegal);
        };
        if !kill_enemy_piece(&mut self.board, color, start, end) {
            return Err(illegal);
        }

        self.roster.current_mut().kill_counter();
        let record = self.record(start, end);
        info!(
            sequence = *record.sequence(),
            captured = %captured,
            kills = *self.current_player().kills(),
            "Capture applied"
        );
        events.push(GameEvent::CaptureApplied { record, captured });

        if has_kill(&self.board, color, end) {
            debug!(from = %end, "Capture chain continues");
            self.chain_from = Some(end);
            return Ok(MoveResult {
                events,
                progress: TurnProgress::ChainContinues(end),
            });
        }

        self.finish_turn(&mut events);
        Ok(MoveResult {
            events,
            progress: TurnProgress::TurnComplete,
        })
    }

    /// Ends the game at a player's request. The move log is not affected.
    #[instrument(skip(self))]
    pub fn abandon(&mut self) -> GameEvent {
        info!(player = %self.current_player().name(), "Game abandoned");
        self.chain_from = None;
        self.end(None, EndReason::Abandoned)
    }

    fn record(&mut self, start: Coord, end: Coord) -> Move {
        self.move_counter += 1;
        let player = self.roster.current();
        Move::new(
            self.move_counter,
            player.name().clone(),
            start,
            end,
            player.is_white(),
        )
    }

    fn end(&mut self, winner: Option<String>, reason: EndReason) -> GameEvent {
        self.status = GameStatus::End;
        self.end_reason = Some(reason);
        GameEvent::GameEnded { winner, reason }
    }

    fn finish_turn(&mut self, events: &mut Vec<GameEvent>) {
        self.chain_from = None;

        let mover = self.roster.current().clone();
        // Exact match: a first capturing turn that overshoots keeps the game going.
        if *mover.kills() == self.kill_threshold {
            info!(winner = %mover.name(), kills = *mover.kills(), "Kill threshold reached");
            let event = self.end(Some(mover.name().clone()), EndReason::KillThreshold);
            events.push(event);
        }

        let next = self.roster.switch_players().clone();
        if self.is_active() && !has_any_move(&self.board, *next.color()) {
            info!(stuck = %next.name(), "Player to move has no legal move");
            let event = self.end(Some(mover.name().clone()), EndReason::NoMovesLeft);
            events.push(event);
        }
    }
}
