//! The 8x8 checkers board.

use serde::{Deserialize, Serialize};
use tracing::{debug, instrument, trace};

use super::error::BoardError;
use super::types::{BOARD_SIZE, Color, Coord, Piece, Spot};

/// Number of rows each side fills at the start of a game.
const STARTING_ROWS: i32 = 3;

/// 8x8 grid of spots, each empty or holding one piece.
///
/// The board only changes through [`Board::reset_board`],
/// [`Board::set_spots_after_move`] and [`Board::advance_piece`], and each of
/// those either applies completely or fails before touching anything.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    /// Spots in row-major order, rank 1 first.
    spots: Vec<Spot>,
}

impl Board {
    /// Creates a board with no pieces on it.
    pub fn new() -> Self {
        Self {
            spots: Coord::all().map(Spot::empty).collect(),
        }
    }

    fn index(coord: Coord) -> usize {
        (coord.y() * BOARD_SIZE + coord.x()) as usize
    }

    /// Clears the board and sets up both sides on the dark squares of their
    /// three home rows: white on ranks 1-3, black on ranks 6-8.
    #[instrument(skip(self))]
    pub fn reset_board(&mut self) {
        for spot in &mut self.spots {
            spot.set_occupant(None);
        }
        for coord in Coord::all().filter(|c| c.is_dark()) {
            let color = if coord.y() < STARTING_ROWS {
                Color::White
            } else if coord.y() >= BOARD_SIZE - STARTING_ROWS {
                Color::Black
            } else {
                continue;
            };
            self.spots[Self::index(coord)].set_occupant(Some(Piece::new(color)));
        }
        debug!(
            white = self.count(Color::White),
            black = self.count(Color::Black),
            "Board reset"
        );
    }

    /// Returns the spot at a coordinate that is known to be on the board.
    pub fn spot(&self, coord: Coord) -> &Spot {
        &self.spots[Self::index(coord)]
    }

    /// Returns the spot at raw coordinates.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::OutOfBounds`] if `(x, y)` is off the board.
    pub fn get_board_spot(&self, x: i32, y: i32) -> Result<&Spot, BoardError> {
        Ok(self.spot(Coord::new(x, y)?))
    }

    /// True if nothing stands at `(x, y)`.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::OutOfBounds`] if `(x, y)` is off the board.
    pub fn is_empty(&self, x: i32, y: i32) -> Result<bool, BoardError> {
        Ok(self.get_board_spot(x, y)?.is_empty())
    }

    /// Returns the piece at `(x, y)`.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::OutOfBounds`] if `(x, y)` is off the board and
    /// [`BoardError::NoPiece`] if the spot is empty.
    pub fn get_piece(&self, x: i32, y: i32) -> Result<Piece, BoardError> {
        let spot = self.get_board_spot(x, y)?;
        spot.occupant().ok_or(BoardError::NoPiece(spot.coord()))
    }

    /// The piece at `coord`, if any.
    pub fn piece_at(&self, coord: Coord) -> Option<Piece> {
        self.spot(coord).occupant()
    }

    /// Moves the piece on `start` to `end`. If the two spots are a jump apart
    /// the spot between them is cleared as well; its coordinate is returned.
    ///
    /// This does not judge legality, only that there is a piece to move and
    /// room to land. Nothing changes unless the whole move can be applied.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::NoPiece`] if `start` is empty and
    /// [`BoardError::Occupied`] if `end` is not.
    #[instrument(skip(self), fields(start = %start, end = %end))]
    pub fn set_spots_after_move(
        &mut self,
        start: Coord,
        end: Coord,
    ) -> Result<Option<Coord>, BoardError> {
        let piece = self.piece_at(start).ok_or(BoardError::NoPiece(start))?;
        if !self.spot(end).is_empty() {
            return Err(BoardError::Occupied(end));
        }

        let dx = end.x() - start.x();
        let dy = end.y() - start.y();
        let captured = if dx.abs() == 2 && dy.abs() == 2 {
            start.offset(dx / 2, dy / 2)
        } else {
            None
        };

        self.spots[Self::index(start)].set_occupant(None);
        if let Some(middle) = captured {
            trace!(captured = %middle, "Clearing jumped spot");
            self.spots[Self::index(middle)].set_occupant(None);
        }
        self.spots[Self::index(end)].set_occupant(Some(piece));
        Ok(captured)
    }

    /// Places a fresh piece of `color` on an empty spot.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::Occupied`] if the spot already holds a piece.
    #[instrument(skip(self), fields(at = %at))]
    pub fn advance_piece(&mut self, at: Coord, color: Color) -> Result<(), BoardError> {
        let spot = &mut self.spots[Self::index(at)];
        if !spot.is_empty() {
            return Err(BoardError::Occupied(at));
        }
        spot.set_occupant(Some(Piece::new(color)));
        Ok(())
    }

    /// Coordinates of every piece of `color`.
    pub fn pieces(&self, color: Color) -> impl Iterator<Item = Coord> + '_ {
        self.spots
            .iter()
            .filter(move |s| s.is_held_by(color))
            .map(Spot::coord)
    }

    /// Number of pieces `color` has left.
    pub fn count(&self, color: Color) -> usize {
        self.pieces(color).count()
    }

    /// Formats the board with rank 8 at the top, `w`/`b` for pieces and `.`
    /// for empty spots.
    pub fn display(&self) -> String {
        let files = "  a b c d e f g h\n";
        let mut out = String::from(files);
        for y in (0..BOARD_SIZE).rev() {
            out.push_str(&format!("{} ", y + 1));
            for x in 0..BOARD_SIZE {
                let symbol = match self.spots[(y * BOARD_SIZE + x) as usize].occupant() {
                    Some(p) if p.color() == Color::White => 'w',
                    Some(_) => 'b',
                    None => '.',
                };
                out.push(symbol);
                out.push(' ');
            }
            out.push_str(&format!("{}\n", y + 1));
        }
        out.push_str(files);
        out
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for Board {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.display())
    }
}
