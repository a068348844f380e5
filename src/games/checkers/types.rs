//! Core domain types for checkers.

use derive_getters::Getters;
use derive_new::new;
use serde::{Deserialize, Serialize};
use tracing::instrument;

use super::error::{BoardError, RosterError};

/// Width and height of the board.
pub const BOARD_SIZE: i32 = 8;

/// Side of the board a player commands.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumIter,
)]
pub enum Color {
    /// Starts on ranks 1-3 and moves first.
    White,
    /// Starts on ranks 6-8.
    Black,
}

impl Color {
    /// Returns the other color.
    pub fn opponent(self) -> Self {
        match self {
            Color::White => Color::Black,
            Color::Black => Color::White,
        }
    }

    /// Row delta of a forward step. Pieces never change direction.
    pub fn forward(self) -> i32 {
        match self {
            Color::White => 1,
            Color::Black => -1,
        }
    }

    /// True for white. This is the color flag stored with players and moves.
    pub fn is_white(self) -> bool {
        matches!(self, Color::White)
    }

    /// Inverse of [`Color::is_white`].
    pub fn from_is_white(is_white: bool) -> Self {
        if is_white { Color::White } else { Color::Black }
    }
}

/// A position on the board: column `x` (file a-h) and row `y` (rank 1-8),
/// both zero-based.
///
/// A `Coord` is always on the board; use [`Coord::new`] to check raw values.
/// It serializes as its token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct Coord {
    x: u8,
    y: u8,
}

impl Coord {
    /// Creates a coordinate from raw column/row values.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::OutOfBounds`] if either value is outside `0..8`.
    pub fn new(x: i32, y: i32) -> Result<Self, BoardError> {
        if (0..BOARD_SIZE).contains(&x) && (0..BOARD_SIZE).contains(&y) {
            Ok(Self {
                x: x as u8,
                y: y as u8,
            })
        } else {
            Err(BoardError::OutOfBounds { x, y })
        }
    }

    /// Zero-based column.
    pub fn x(self) -> i32 {
        i32::from(self.x)
    }

    /// Zero-based row.
    pub fn y(self) -> i32 {
        i32::from(self.y)
    }

    /// Returns the coordinate `(dx, dy)` away, if it is still on the board.
    pub fn offset(self, dx: i32, dy: i32) -> Option<Self> {
        Self::new(self.x() + dx, self.y() + dy).ok()
    }

    /// Parses a two-character token such as `"c3"` or `"C3"`.
    ///
    /// The file letter maps to its position in the alphabet and the rank
    /// digit to `digit - 1`. Anything else yields `None`.
    pub fn from_token(token: &str) -> Option<Self> {
        let mut chars = token.chars();
        let (file, rank) = match (chars.next(), chars.next(), chars.next()) {
            (Some(file), Some(rank), None) => (file.to_ascii_lowercase(), rank),
            _ => return None,
        };
        if !('a'..='h').contains(&file) || !('1'..='8').contains(&rank) {
            return None;
        }
        let x = file as i32 - 'a' as i32;
        let y = rank as i32 - '1' as i32;
        Self::new(x, y).ok()
    }

    /// Formats the coordinate back into its lower-case token.
    pub fn to_token(self) -> String {
        let file = char::from(b'a' + self.x);
        let rank = char::from(b'1' + self.y);
        format!("{file}{rank}")
    }

    /// All 64 coordinates, row by row starting from rank 1.
    pub fn all() -> impl Iterator<Item = Coord> {
        (0..BOARD_SIZE as u8).flat_map(|y| (0..BOARD_SIZE as u8).map(move |x| Coord { x, y }))
    }

    /// Playable squares are the dark ones; `a1` is dark.
    pub fn is_dark(self) -> bool {
        (self.x + self.y) % 2 == 0
    }
}

impl std::fmt::Display for Coord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_token())
    }
}

impl From<Coord> for String {
    fn from(coord: Coord) -> Self {
        coord.to_token()
    }
}

impl TryFrom<String> for Coord {
    type Error = String;

    fn try_from(token: String) -> Result<Self, Self::Error> {
        Coord::from_token(&token).ok_or_else(|| format!("'{token}' is not a board coordinate"))
    }
}

/// A checker. There is no promotion, so a piece is fully described by its color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, new)]
pub struct Piece {
    color: Color,
}

impl Piece {
    /// Owner's color.
    pub fn color(self) -> Color {
        self.color
    }
}

/// One square of the board and whatever stands on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Spot {
    coord: Coord,
    occupant: Option<Piece>,
}

impl Spot {
    /// Creates an empty spot.
    pub fn empty(coord: Coord) -> Self {
        Self {
            coord,
            occupant: None,
        }
    }

    /// Position of this spot.
    pub fn coord(&self) -> Coord {
        self.coord
    }

    /// The piece standing here, if any.
    pub fn occupant(&self) -> Option<Piece> {
        self.occupant
    }

    /// True if nothing stands here.
    pub fn is_empty(&self) -> bool {
        self.occupant.is_none()
    }

    /// True if a piece of `color` stands here.
    pub fn is_held_by(&self, color: Color) -> bool {
        self.occupant.is_some_and(|p| p.color() == color)
    }

    pub(super) fn set_occupant(&mut self, occupant: Option<Piece>) {
        self.occupant = occupant;
    }
}

/// A participant: unique name, fixed color and a capture count.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters)]
pub struct Player {
    name: String,
    color: Color,
    kills: u32,
}

impl Player {
    /// Creates a player with no captures.
    pub fn new(name: impl AsRef<str>, color: Color) -> Self {
        Self {
            name: name.as_ref().to_string(),
            color,
            kills: 0,
        }
    }

    /// True if this player commands the white pieces.
    pub fn is_white(&self) -> bool {
        self.color.is_white()
    }

    /// Adds one completed capture.
    pub fn kill_counter(&mut self) {
        self.kills += 1;
    }
}

impl std::fmt::Display for Player {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({}, {} kills)", self.name, self.color, self.kills)
    }
}

/// The two players of a game and whose turn it is.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Roster {
    players: [Player; 2],
    current: usize,
}

impl Roster {
    /// Builds a roster from exactly two players of different colors and
    /// names. White moves first regardless of the order given.
    ///
    /// # Errors
    ///
    /// Returns [`RosterError`] if the count, colors or names are wrong.
    #[instrument(skip(players), fields(count = players.len()))]
    pub fn new(players: Vec<Player>) -> Result<Self, RosterError> {
        let players: [Player; 2] = players
            .try_into()
            .map_err(|rest: Vec<Player>| RosterError::WrongCount(rest.len()))?;
        if players[0].color == players[1].color {
            return Err(RosterError::SameColor(players[0].color));
        }
        if players[0].name == players[1].name {
            return Err(RosterError::SameName(players[0].name.clone()));
        }
        let current = if players[0].is_white() { 0 } else { 1 };
        Ok(Self { players, current })
    }

    /// Both players, in the order given at construction.
    pub fn players(&self) -> &[Player; 2] {
        &self.players
    }

    /// The player to move.
    pub fn current(&self) -> &Player {
        &self.players[self.current]
    }

    pub(super) fn current_mut(&mut self) -> &mut Player {
        &mut self.players[self.current]
    }

    /// The player waiting for their turn.
    pub fn waiting(&self) -> &Player {
        &self.players[1 - self.current]
    }

    /// Hands the turn to the other player and returns them.
    pub fn switch_players(&mut self) -> &Player {
        self.current = 1 - self.current;
        &self.players[self.current]
    }

    /// Looks a player up by color.
    pub fn by_color(&self, color: Color) -> &Player {
        if self.players[0].color == color {
            &self.players[0]
        } else {
            &self.players[1]
        }
    }
}

/// One applied leg of a turn, as written to the move log.
///
/// A capture chain produces one `Move` per jump, all with the same player.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters, new)]
pub struct Move {
    sequence: u32,
    player_name: String,
    start: Coord,
    end: Coord,
    is_white: bool,
}

impl Move {
    /// Color of the side that made this move.
    pub fn color(&self) -> Color {
        Color::from_is_white(self.is_white)
    }
}

impl std::fmt::Display for Move {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "#{} {} ({}): {} -> {}",
            self.sequence,
            self.player_name,
            self.color(),
            self.start,
            self.end
        )
    }
}

/// Whether the game still accepts moves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display)]
pub enum GameStatus {
    /// Moves are accepted.
    Active,
    /// Terminal. No further moves.
    End,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_maps_file_and_rank() {
        let c = Coord::from_token("c3").unwrap();
        assert_eq!((c.x(), c.y()), (2, 2));
        let h8 = Coord::from_token("H8").unwrap();
        assert_eq!((h8.x(), h8.y()), (7, 7));
    }

    #[test]
    fn test_token_rejects_malformed() {
        for bad in ["", "a", "a0", "a9", "i1", "1a", "a11", "exit", " a1"] {
            assert_eq!(Coord::from_token(bad), None, "{bad:?}");
        }
    }

    #[test]
    fn test_coord_out_of_bounds() {
        assert!(matches!(
            Coord::new(8, 0),
            Err(BoardError::OutOfBounds { x: 8, y: 0 })
        ));
        assert!(Coord::new(-1, 3).is_err());
    }

    #[test]
    fn test_roster_white_moves_first() {
        let roster = Roster::new(vec![
            Player::new("bea", Color::Black),
            Player::new("wes", Color::White),
        ])
        .unwrap();
        assert_eq!(roster.current().name(), "wes");
        assert_eq!(roster.waiting().name(), "bea");
    }

    #[test]
    fn test_roster_rejects_same_color() {
        let result = Roster::new(vec![
            Player::new("a", Color::White),
            Player::new("b", Color::White),
        ]);
        assert!(matches!(result, Err(RosterError::SameColor(Color::White))));
    }

    #[test]
    fn test_roster_rejects_wrong_count() {
        let result = Roster::new(vec![Player::new("a", Color::White)]);
        assert!(matches!(result, Err(RosterError::WrongCount(1))));
    }

    #[test]
    fn test_switch_players_alternates() {
        let mut roster = Roster::new(vec![
            Player::new("wes", Color::White),
            Player::new("bea", Color::Black),
        ])
        .unwrap();
        assert_eq!(roster.switch_players().name(), "bea");
        assert_eq!(roster.switch_players().name(), "wes");
    }

    #[test]
    fn test_kill_counter_increments() {
        let mut p = Player::new("wes", Color::White);
        p.kill_counter();
        p.kill_counter();
        assert_eq!(*p.kills(), 2);
    }
}
