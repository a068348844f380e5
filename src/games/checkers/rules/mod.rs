//! Movement rules for checkers.
//!
//! Pure functions over a [`Board`](super::Board). Pieces are never promoted,
//! so every move and capture goes along one of the two forward diagonals
//! of the mover's color.

pub mod capture;
pub mod movement;

pub use capture::{capture_target, has_kill, kill_enemy_piece};
pub use movement::{can_move, has_any_move, is_end_spot_valid};

/// Column deltas of the two forward diagonals.
pub(crate) const DIAGONALS: [i32; 2] = [-1, 1];
