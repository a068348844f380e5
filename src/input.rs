//! Line input for the console game.
//!
//! The session reads through [`InputSource`] instead of a global stdin
//! handle, so tests can feed it a script.

use std::collections::VecDeque;
use std::io::BufRead;

use tracing::{debug, instrument};

use crate::Coord;

/// Token that ends the game from any prompt.
pub const EXIT_TOKEN: &str = "exit";

/// Something that yields lines of text.
pub trait InputSource {
    /// Reads the next line without its line terminator. `None` means the
    /// input is exhausted.
    ///
    /// # Errors
    ///
    /// Returns an I/O error if the underlying reader fails.
    fn next_line(&mut self) -> std::io::Result<Option<String>>;
}

/// Reads lines from any buffered reader, such as locked stdin.
#[derive(Debug)]
pub struct LineReader<R> {
    reader: R,
}

impl<R: BufRead> LineReader<R> {
    /// Wraps a reader.
    pub fn new(reader: R) -> Self {
        Self { reader }
    }
}

impl<R: BufRead> InputSource for LineReader<R> {
    fn next_line(&mut self) -> std::io::Result<Option<String>> {
        let mut line = String::new();
        if self.reader.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        let trimmed = line.trim_end_matches(['\n', '\r']).len();
        line.truncate(trimmed);
        Ok(Some(line))
    }
}

/// Replays a fixed list of lines, then reports end of input.
#[derive(Debug, Clone, Default)]
pub struct ScriptedInput {
    lines: VecDeque<String>,
}

impl ScriptedInput {
    /// Creates a script from lines.
    pub fn new<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            lines: lines.into_iter().map(Into::into).collect(),
        }
    }

    /// Lines not yet consumed.
    pub fn remaining(&self) -> usize {
        self.lines.len()
    }
}

impl InputSource for ScriptedInput {
    fn next_line(&mut self) -> std::io::Result<Option<String>> {
        Ok(self.lines.pop_front())
    }
}

/// A line read at a coordinate prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Token {
    /// A well-formed board coordinate.
    Spot(Coord),
    /// The player wants to stop playing.
    Exit,
}

/// Why a line was not accepted as a token. Always answered with a re-prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum TokenError {
    /// Not exactly two characters.
    #[display("expected two characters, such as c3")]
    WrongLength,
    /// Two characters, but not a file a-h followed by a rank 1-8.
    #[display("expected a file a-h followed by a rank 1-8")]
    Malformed,
}

/// Parses one line from a coordinate prompt.
///
/// `exit` must be the whole line. Whitespace around a coordinate is ignored.
///
/// # Errors
///
/// Returns [`TokenError`] for anything that is neither `exit` nor a
/// coordinate token.
#[instrument]
pub fn parse_token(line: &str) -> Result<Token, TokenError> {
    if line == EXIT_TOKEN {
        return Ok(Token::Exit);
    }
    let line = line.trim();
    if line.chars().count() != 2 {
        debug!("Token has wrong length");
        return Err(TokenError::WrongLength);
    }
    Coord::from_token(line)
        .map(Token::Spot)
        .ok_or(TokenError::Malformed)
}
