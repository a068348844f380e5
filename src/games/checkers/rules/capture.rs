//! Captures along the forward diagonals.

use super::super::{Board, Color, Coord};
use super::DIAGONALS;
use tracing::{debug, instrument};

/// Returns the spot jumped over if `start -> end` is a legal capture for
/// `color`: `start` holds a piece of `color`, `end` is exactly two forward
/// diagonal steps away and empty, and the spot between holds an enemy piece.
pub fn capture_target(board: &Board, color: Color, start: Coord, end: Coord) -> Option<Coord> {
    if !board.spot(start).is_held_by(color) || !board.spot(end).is_empty() {
        return None;
    }
    let dx = end.x() - start.x();
    let dy = end.y() - start.y();
    if dy != 2 * color.forward() || dx.abs() != 2 {
        return None;
    }
    let middle = start.offset(dx / 2, dy / 2)?;
    board
        .spot(middle)
        .is_held_by(color.opponent())
        .then_some(middle)
}

/// True if the piece of `color` on `from` can capture along either forward
/// diagonal.
#[instrument(skip(board), fields(from = %from))]
pub fn has_kill(board: &Board, color: Color, from: Coord) -> bool {
    DIAGONALS.iter().any(|&dx| {
        from.offset(2 * dx, 2 * color.forward())
            .is_some_and(|landing| capture_target(board, color, from, landing).is_some())
    })
}

/// Performs the capture `start -> end` if it is legal: the enemy piece in
/// between is removed and the capturing piece lands on `end`.
///
/// Returns `false` and leaves the board untouched if `end` is not the landing
/// spot of a legal capture from `start`.
#[instrument(skip(board), fields(start = %start, end = %end))]
pub fn kill_enemy_piece(board: &mut Board, color: Color, start: Coord, end: Coord) -> bool {
    let Some(middle) = capture_target(board, color, start, end) else {
        return false;
    };
    match board.set_spots_after_move(start, end) {
        Ok(_) => {
            debug!(captured = %middle, "Enemy piece removed");
            true
        }
        Err(_) => false,
    }
}
