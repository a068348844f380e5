//! Tests for rebuilding a game from its move log.

mod common;

use common::{DOUBLE_JUMP_LINE, SINGLE_CAPTURE_LINE, at, players, roster};
use strictly_checkers::{
    Color, Game, GameStatus, Move, MoveRejection, Player, ReplayError, RosterError,
};

/// Plays a line live and returns the game and its move log.
fn live(line: &[(&str, &str)], kill_threshold: u32) -> (Game, Vec<Move>) {
    let mut game = Game::new(roster(), kill_threshold);
    let mut log = Vec::new();
    for (start, end) in line {
        let result = game.make_move(at(start), at(end)).expect("legal move");
        log.extend(result.events().iter().filter_map(|e| e.record().cloned()));
    }
    (game, log)
}

#[test]
fn test_empty_log_gives_opening_position() {
    let game = Game::replay(players(), &[], 1).expect("replay");
    assert_eq!(game.status(), GameStatus::Active);
    assert_eq!(game.current_player().name(), "Alice");
    assert_eq!(game.move_counter(), 0);
    assert_eq!(game.board().count(Color::White), 12);
    assert_eq!(game.board().count(Color::Black), 12);
}

#[test]
fn test_replay_matches_live_play() {
    let (live_game, log) = live(&DOUBLE_JUMP_LINE, 3);
    assert_eq!(log.len(), 7);

    let replayed = Game::replay(players(), &log, 3).expect("replay");
    assert_eq!(replayed.board(), live_game.board());
    assert_eq!(replayed.roster(), live_game.roster());
    assert_eq!(replayed.status(), GameStatus::Active);
    assert_eq!(replayed.current_player().name(), "Alice");
    assert_eq!(replayed.move_counter(), 7);
    assert_eq!(*replayed.roster().by_color(Color::Black).kills(), 2);
}

#[test]
fn test_replay_restores_open_chain() {
    let (_, log) = live(&DOUBLE_JUMP_LINE, 3);

    // Stop after the first jump of the chain.
    let replayed = Game::replay(players(), &log[..6], 3).expect("replay");
    assert_eq!(replayed.current_player().name(), "Bob");
    assert_eq!(replayed.chain_from(), Some(at("d4")));
    assert_eq!(
        replayed.validate_start_spot(at("h6")),
        Err(MoveRejection::MustContinueChain(at("d4")))
    );
}

#[test]
fn test_replay_of_finished_game_is_over() {
    let (_, log) = live(&SINGLE_CAPTURE_LINE, 1);
    let mut replayed = Game::replay(players(), &log, 1).expect("replay");
    assert_eq!(replayed.status(), GameStatus::End);
    assert_eq!(
        replayed.make_move(at("f6"), at("e5")),
        Err(MoveRejection::GameOver)
    );
}

#[test]
fn test_threshold_applies_to_replay() {
    let (_, log) = live(&SINGLE_CAPTURE_LINE, 2);
    let replayed = Game::replay(players(), &log, 2).expect("replay");
    assert_eq!(replayed.status(), GameStatus::Active);
    assert_eq!(replayed.current_player().name(), "Bob");
}

#[test]
fn test_replay_continues_after_double_jump_past_threshold() {
    let (live_game, mut log) = live(&DOUBLE_JUMP_LINE, 1);
    assert_eq!(live_game.status(), GameStatus::Active);
    log.push(Move::new(8, "Alice".into(), at("e3"), at("f4"), true));

    let replayed = Game::replay(players(), &log, 1).expect("replay");
    assert_eq!(replayed.status(), GameStatus::Active);
    assert_eq!(replayed.move_counter(), 8);
    assert_eq!(replayed.current_player().name(), "Bob");
    assert_eq!(*replayed.roster().by_color(Color::Black).kills(), 2);
    assert!(replayed.board().spot(at("f4")).is_held_by(Color::White));
}

#[test]
fn test_sequence_counter_continues_after_replay() {
    let (_, log) = live(&SINGLE_CAPTURE_LINE[..2], 1);
    let mut replayed = Game::replay(players(), &log, 1).expect("replay");
    let result = replayed.make_move(at("g3"), at("h4")).expect("legal move");
    let record = result.events()[0].record().expect("move event");
    assert_eq!(*record.sequence(), 3);
}

#[test]
fn test_gaps_in_sequence_are_kept() {
    let log = vec![
        Move::new(10, "Alice".into(), at("c3"), at("d4"), true),
        Move::new(20, "Bob".into(), at("f6"), at("e5"), false),
    ];
    let game = Game::replay(players(), &log, 1).expect("replay");
    assert_eq!(game.move_counter(), 20);
}

#[test]
fn test_out_of_order_log_rejected() {
    let log = vec![
        Move::new(2, "Alice".into(), at("c3"), at("d4"), true),
        Move::new(2, "Bob".into(), at("f6"), at("e5"), false),
    ];
    assert_eq!(
        Game::replay(players(), &log, 1).unwrap_err(),
        ReplayError::OutOfOrder {
            sequence: 2,
            previous: 2
        }
    );
}

#[test]
fn test_wrong_side_rejected() {
    let log = vec![Move::new(1, "Bob".into(), at("f6"), at("e5"), false)];
    assert_eq!(
        Game::replay(players(), &log, 1).unwrap_err(),
        ReplayError::WrongSide {
            sequence: 1,
            logged: Color::Black,
            expected: Color::White,
        }
    );
}

#[test]
fn test_illegal_logged_move_rejected() {
    let log = vec![
        Move::new(1, "Alice".into(), at("c3"), at("d4"), true),
        Move::new(2, "Bob".into(), at("f6"), at("f5"), false),
    ];
    assert_eq!(
        Game::replay(players(), &log, 1).unwrap_err(),
        ReplayError::Refused {
            sequence: 2,
            rejection: MoveRejection::Illegal {
                start: at("f6"),
                end: at("f5"),
            },
        }
    );
}

#[test]
fn test_stored_kill_counts_are_ignored() {
    let mut alice = Player::new("Alice", Color::White);
    alice.kill_counter();
    let game = Game::replay(vec![alice, Player::new("Bob", Color::Black)], &[], 1)
        .expect("replay");
    assert_eq!(*game.roster().by_color(Color::White).kills(), 0);
    assert_eq!(game.status(), GameStatus::Active);
}

#[test]
fn test_bad_roster_rejected() {
    let err = Game::replay(vec![Player::new("Alice", Color::White)], &[], 1).unwrap_err();
    assert_eq!(err, ReplayError::Roster(RosterError::WrongCount(1)));
}
