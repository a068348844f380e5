//! Shared helpers for integration tests.

#![allow(dead_code)]

use strictly_checkers::{Color, Coord, Player, Roster};

/// Parses a token that the test knows is valid.
pub fn at(token: &str) -> Coord {
    Coord::from_token(token).expect("valid token")
}

/// Alice plays white, Bob plays black.
pub fn players() -> Vec<Player> {
    vec![
        Player::new("Alice", Color::White),
        Player::new("Bob", Color::Black),
    ]
}

/// Roster built from [`players`].
pub fn roster() -> Roster {
    Roster::new(players()).expect("valid roster")
}

/// Opening line ending in a black double jump: b6xd4 then d4xb2.
pub const DOUBLE_JUMP_LINE: [(&str, &str); 7] = [
    ("a3", "b4"),
    ("b6", "a5"),
    ("b2", "a3"),
    ("a7", "b6"),
    ("b4", "c5"),
    ("b6", "d4"),
    ("d4", "b2"),
];

/// Opening line ending in a single white capture: d4xb6.
pub const SINGLE_CAPTURE_LINE: [(&str, &str); 3] = [("c3", "d4"), ("b6", "c5"), ("d4", "b6")];
