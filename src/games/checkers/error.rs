//! Error types for the checkers engine.

use derive_more::{Display, Error, From};

use super::types::{Color, Coord};

/// Misuse of the board API: a caller asked for something that is not there.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Error)]
pub enum BoardError {
    /// Raw coordinates outside the 8x8 grid.
    #[display("coordinate ({x}, {y}) is off the board")]
    OutOfBounds {
        /// Column.
        x: i32,
        /// Row.
        y: i32,
    },
    /// A piece was expected at this spot.
    #[display("no piece at {_0}")]
    NoPiece(#[error(not(source))] Coord),
    /// A piece was about to be placed on an occupied spot.
    #[display("spot {_0} is occupied")]
    Occupied(#[error(not(source))] Coord),
}

/// Why a requested move was refused. The board is untouched in every case.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
pub enum MoveRejection {
    /// The game has already ended.
    #[display("the game is over")]
    GameOver,
    /// The source does not hold one of the mover's pieces.
    #[display("{_0} is not one of your checkers")]
    NotYourPiece(#[error(not(source))] Coord),
    /// The destination already holds a piece.
    #[display("{_0} is occupied")]
    DestinationOccupied(#[error(not(source))] Coord),
    /// The piece has neither a simple move nor a capture.
    #[display("the checker on {_0} has no legal move")]
    NoLegalMove(#[error(not(source))] Coord),
    /// A capture chain is in progress and must continue from this spot.
    #[display("you must keep capturing with the checker on {_0}")]
    MustContinueChain(#[error(not(source))] Coord),
    /// Neither a simple move nor a capture leads there.
    #[display("{start} -> {end} is not a legal move")]
    Illegal {
        /// Source spot.
        start: Coord,
        /// Requested destination.
        end: Coord,
    },
}

/// The two players of a game do not form a valid pairing.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
pub enum RosterError {
    /// A game needs exactly two players.
    #[display("expected 2 players, found {_0}")]
    WrongCount(#[error(not(source))] usize),
    /// Both players have the same color.
    #[display("both players are {_0}")]
    SameColor(#[error(not(source))] Color),
    /// Both players have the same name.
    #[display("both players are named '{_0}'")]
    SameName(#[error(not(source))] String),
}

/// A persisted game could not be rebuilt from its move log.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error, From)]
pub enum ReplayError {
    /// The stored players do not form a roster.
    #[display("invalid roster: {_0}")]
    #[from]
    Roster(RosterError),
    /// Sequence numbers must strictly increase.
    #[display("move #{sequence} follows #{previous}")]
    OutOfOrder {
        /// Sequence number of the offending move.
        sequence: u32,
        /// Sequence number of the move before it.
        previous: u32,
    },
    /// A move was logged for the side that was not on turn.
    #[display("move #{sequence} was made by {logged} but {expected} was to move")]
    WrongSide {
        /// Sequence number of the offending move.
        sequence: u32,
        /// Color recorded with the move.
        logged: Color,
        /// Color whose turn it was.
        expected: Color,
    },
    /// The rules refused a logged move.
    #[display("move #{sequence} was refused: {rejection}")]
    Refused {
        /// Sequence number of the offending move.
        sequence: u32,
        /// The engine's reason.
        #[error(source)]
        rejection: MoveRejection,
    },
}
