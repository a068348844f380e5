//! Simple (non-capturing) moves and mobility checks.

use super::super::{Board, Color, Coord};
use super::DIAGONALS;
use super::capture::has_kill;
use tracing::instrument;

/// Checks a simple move: `start` holds a piece of `color`, `end` is empty and
/// lies one diagonal step forward from `start`.
///
/// Captures are not considered here.
#[instrument(skip(board), fields(start = %start, end = %end))]
pub fn is_end_spot_valid(board: &Board, color: Color, start: Coord, end: Coord) -> bool {
    board.spot(start).is_held_by(color)
        && board.spot(end).is_empty()
        && end.y() - start.y() == color.forward()
        && (end.x() - start.x()).abs() == 1
}

/// True if the piece of `color` on `from` has a simple move or a capture.
pub fn can_move(board: &Board, color: Color, from: Coord) -> bool {
    if !board.spot(from).is_held_by(color) {
        return false;
    }
    let steps_forward = DIAGONALS
        .iter()
        .filter_map(|&dx| from.offset(dx, color.forward()))
        .any(|to| board.spot(to).is_empty());
    steps_forward || has_kill(board, color, from)
}

/// True if any piece of `color` can move.
#[instrument(skip(board))]
pub fn has_any_move(board: &Board, color: Color) -> bool {
    board.pieces(color).any(|from| can_move(board, color, from))
}
