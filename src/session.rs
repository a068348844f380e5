//! Console game session.
//!
//! A [`Session`] drives one game over injected input, output and storage:
//! it names the players, rebuilds a saved game, runs the turn loop and hands
//! every game event to the move log.

use std::io::Write;

use derive_more::{Display, Error, From};
use tracing::{debug, info, instrument, warn};

use crate::input::{InputSource, Token, parse_token};
use crate::store::{EventSink, GameStore, MoveRecorder};
use crate::{
    CheckersConfig, Color, DbError, EndReason, Game, GameEvent, Move, Player, ReplayError,
    Roster, RosterError, TurnProgress,
};

/// Failure that ends a session.
#[derive(Debug, Display, Error, From)]
pub enum SessionError {
    /// The store failed.
    #[display("storage failed: {_0}")]
    #[from]
    Store(DbError),
    /// The saved game could not be rebuilt.
    #[display("saved game is unreadable: {_0}")]
    #[from]
    Replay(ReplayError),
    /// The players could not be paired.
    #[display("invalid players: {_0}")]
    #[from]
    Roster(RosterError),
    /// Reading input or writing output failed.
    #[display("console I/O failed: {_0}")]
    #[from]
    Io(std::io::Error),
    /// Input ended while a player name was still needed.
    #[display("input ended before both players were named")]
    InputClosed,
    /// `play` was called before a game was started or loaded.
    #[display("no game has been started or loaded")]
    NoGame,
}

/// One console game over injected input, output and store.
pub struct Session<'s, I, W, S: ?Sized> {
    input: I,
    output: W,
    store: &'s S,
    config: CheckersConfig,
    game: Option<Game>,
}

impl<'s, I, W, S> Session<'s, I, W, S>
where
    I: InputSource,
    W: Write,
    S: GameStore + ?Sized,
{
    /// Creates a session with no game loaded.
    pub fn new(input: I, output: W, store: &'s S, config: CheckersConfig) -> Self {
        Self {
            input,
            output,
            store,
            config,
            game: None,
        }
    }

    /// The loaded game, if any.
    pub fn game(&self) -> Option<&Game> {
        self.game.as_ref()
    }

    /// The output written so far.
    pub fn output(&self) -> &W {
        &self.output
    }

    /// Consumes the session, returning the game and the output.
    pub fn into_parts(self) -> (Option<Game>, W) {
        (self.game, self.output)
    }

    /// Wipes the store, asks for the white and then the black player's
    /// name, and sets up the opening position.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError`] if the store fails or input ends early.
    #[instrument(skip(self))]
    pub fn new_game(&mut self) -> Result<&Game, SessionError> {
        self.store.reset_players()?;
        self.store.reset_moves()?;

        let white = self.create_player(Color::White)?;
        let black = self.create_player(Color::Black)?;
        for player in self.store.all_players()? {
            writeln!(self.output, "{player}")?;
        }

        let game = Game::new(Roster::new(vec![white, black])?, *self.config.kill_threshold());
        writeln!(self.output, "{}", game.board())?;
        info!("New game started");
        Ok(self.game.insert(game))
    }

    fn create_player(&mut self, color: Color) -> Result<Player, SessionError> {
        loop {
            writeln!(self.output, "Enter {color} Player name:")?;
            let Some(line) = self.input.next_line()? else {
                return Err(SessionError::InputClosed);
            };
            let name = line.trim();
            if name.is_empty() {
                writeln!(self.output, "Name cannot be empty!")?;
                continue;
            }
            if self.store.get_by_name(name)?.is_some() {
                debug!(name, "Duplicate player name");
                writeln!(self.output, "Player {name} already exists!")?;
                continue;
            }
            let player = Player::new(name, color);
            self.store.add_player(&player)?;
            return Ok(player);
        }
    }

    /// Loads the stored players and replays the stored move log.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError`] if the store fails or the log cannot be
    /// replayed.
    #[instrument(skip(self))]
    pub fn continue_game(&mut self) -> Result<&Game, SessionError> {
        let players = self.store.all_players()?;
        let moves = self.store.all_moves()?;
        let game = Game::replay(players, &moves, *self.config.kill_threshold())?;

        writeln!(self.output, "{}", game.board())?;
        if game.is_active() {
            if let Some(from) = game.chain_from() {
                writeln!(
                    self.output,
                    "{} must keep capturing from {from}.",
                    game.current_player().name()
                )?;
            }
        } else {
            writeln!(self.output, "This game is already over.")?;
        }
        Ok(self.game.insert(game))
    }

    /// Runs turns until the game ends or a player types `exit`.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError`] if no game is loaded or the store or console
    /// fails.
    #[instrument(skip(self))]
    pub fn play(&mut self) -> Result<(), SessionError> {
        let mut events = Vec::new();
        loop {
            let game = self.game.as_ref().ok_or(SessionError::NoGame)?;
            if !game.is_active() {
                break;
            }
            events.extend(self.play_turn()?);
        }

        let ended = events
            .iter()
            .rev()
            .find(|e| matches!(e, GameEvent::GameEnded { .. }));
        match ended {
            Some(GameEvent::GameEnded {
                winner: Some(winner),
                reason,
            }) => writeln!(self.output, "Game over! {winner} wins ({}).", describe(*reason))?,
            Some(GameEvent::GameEnded { reason, .. }) => {
                writeln!(self.output, "Game over ({}).", describe(*reason))?
            }
            _ => writeln!(self.output, "Game over.")?,
        }
        Ok(())
    }

    /// Plays one full turn for the current player, including any capture
    /// chain, and returns the events it produced.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError`] if no game is loaded or the store or console
    /// fails.
    #[instrument(skip(self))]
    pub fn play_turn(&mut self) -> Result<Vec<GameEvent>, SessionError> {
        let game = self.game.as_mut().ok_or(SessionError::NoGame)?;
        let mut sink = MoveRecorder::new(self.store);
        let mut emitted = Vec::new();

        writeln!(self.output, "{} move.", game.current_player().name())?;

        let mut start = match game.chain_from() {
            Some(from) => from,
            None => loop {
                writeln!(self.output, "Which checker to move?")?;
                let Token::Spot(start) = read_token(&mut self.input, &mut self.output)? else {
                    return abandon(game, &mut sink, emitted);
                };
                match game.validate_start_spot(start) {
                    Ok(()) => break start,
                    Err(rejection) => writeln!(self.output, "Invalid checker: {rejection}.")?,
                }
            },
        };

        loop {
            writeln!(self.output, "Where to go?")?;
            let Token::Spot(end) = read_token(&mut self.input, &mut self.output)? else {
                return abandon(game, &mut sink, emitted);
            };

            let result = match game.make_move(start, end) {
                Ok(result) => result,
                Err(rejection) => {
                    debug!(%rejection, "Move refused");
                    writeln!(self.output, "Invalid board spot! {rejection}.")?;
                    continue;
                }
            };

            let progress = *result.progress();
            for event in result.into_events() {
                sink.handle(&event)?;
                emitted.push(event);
            }
            if *self.config.show_board() {
                writeln!(self.output, "{}", game.board())?;
            }
            match progress {
                TurnProgress::ChainContinues(from) => {
                    writeln!(self.output, "Another kill!")?;
                    start = from;
                }
                TurnProgress::TurnComplete => return Ok(emitted),
            }
        }
    }
}

fn abandon<M: crate::store::MoveStore + ?Sized>(
    game: &mut Game,
    sink: &mut MoveRecorder<'_, M>,
    mut emitted: Vec<GameEvent>,
) -> Result<Vec<GameEvent>, SessionError> {
    let event = game.abandon();
    sink.handle(&event)?;
    emitted.push(event);
    Ok(emitted)
}

/// Reads lines until one is `exit` or a coordinate. End of input counts as
/// `exit`.
fn read_token<I: InputSource, W: Write>(
    input: &mut I,
    output: &mut W,
) -> Result<Token, SessionError> {
    loop {
        let Some(line) = input.next_line()? else {
            warn!("Input ended, leaving the game");
            return Ok(Token::Exit);
        };
        match parse_token(&line) {
            Ok(token) => return Ok(token),
            Err(e) => writeln!(output, "Invalid input! ({e})")?,
        }
    }
}

fn describe(reason: EndReason) -> &'static str {
    match reason {
        EndReason::KillThreshold => "capture limit reached",
        EndReason::NoMovesLeft => "opponent cannot move",
        EndReason::Abandoned => "game left",
    }
}

/// Writes the stored players and move log, as text or as JSON.
///
/// # Errors
///
/// Returns [`SessionError`] if the store or the output fails.
#[instrument(skip(store, output))]
pub fn write_log<S, W>(store: &S, output: &mut W, json: bool) -> Result<(), SessionError>
where
    S: GameStore + ?Sized,
    W: Write,
{
    let players = store.all_players()?;
    let moves: Vec<Move> = store.all_moves()?;

    if json {
        let doc = serde_json::json!({ "players": players, "moves": moves });
        serde_json::to_writer_pretty(&mut *output, &doc).map_err(std::io::Error::from)?;
        writeln!(output)?;
        return Ok(());
    }

    writeln!(output, "Players:")?;
    for player in &players {
        writeln!(output, "  {} ({})", player.name(), player.color())?;
    }
    writeln!(output, "Moves:")?;
    for record in &moves {
        writeln!(output, "  {record}")?;
    }
    Ok(())
}
