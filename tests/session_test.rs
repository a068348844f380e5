//! Tests for the console session driven by scripted input.

mod common;

use common::{DOUBLE_JUMP_LINE, SINGLE_CAPTURE_LINE, at, players};
use strictly_checkers::{
    CheckersConfig, Color, GameRepository, GameStatus, MemoryStore, Move, MoveStore, Player,
    PlayerStore, ScriptedInput, Session, SessionError, write_log,
};
use tempfile::TempDir;

fn config(kill_threshold: u32) -> CheckersConfig {
    CheckersConfig::default()
        .with_kill_threshold(kill_threshold)
        .expect("valid threshold")
        .with_show_board(false)
}

/// Names Alice and Bob, plays the given line token by token, then feeds
/// `tail`. A chain's second leg needs only its destination, so pass it in
/// `tail`.
fn script(line: &[(&str, &str)], tail: &[&str]) -> ScriptedInput {
    let mut lines = vec!["Alice".to_string(), "Bob".to_string()];
    for (start, end) in line {
        lines.push(start.to_string());
        lines.push(end.to_string());
    }
    lines.extend(tail.iter().map(|s| s.to_string()));
    ScriptedInput::new(lines)
}

fn text(output: Vec<u8>) -> String {
    String::from_utf8(output).expect("utf-8 output")
}

#[test]
fn test_new_game_to_capture_limit() {
    let store = MemoryStore::new();
    let mut session = Session::new(
        script(&SINGLE_CAPTURE_LINE, &[]),
        Vec::new(),
        &store,
        config(1),
    );
    session.new_game().expect("new game");
    session.play().expect("play");

    let (game, output) = session.into_parts();
    let game = game.expect("game loaded");
    assert_eq!(game.status(), GameStatus::End);

    let output = text(output);
    assert!(output.contains("Enter White Player name:"));
    assert!(output.contains("Enter Black Player name:"));
    assert!(output.contains("Alice move."));
    assert!(output.contains("Bob move."));
    assert!(output.contains("Game over! Alice wins (capture limit reached)."));

    let moves = store.all_moves().expect("moves");
    assert_eq!(moves.len(), 3);
    assert_eq!(
        moves[2],
        Move::new(3, "Alice".into(), at("d4"), at("b6"), true)
    );
    assert_eq!(store.all_players().expect("players"), players());
}

#[test]
fn test_new_game_clears_previous_game() {
    let old = vec![Move::new(1, "Old".into(), at("c3"), at("d4"), true)];
    let store = MemoryStore::with_contents(
        vec![Player::new("Old", Color::White)],
        old,
    );
    let mut session = Session::new(script(&[], &["exit"]), Vec::new(), &store, config(1));
    session.new_game().expect("new game");
    session.play().expect("play");

    assert!(store.all_moves().expect("moves").is_empty());
    assert_eq!(store.all_players().expect("players"), players());
    assert!(text(session.into_parts().1).contains("Game over (game left)."));
}

#[test]
fn test_name_prompts_repeat_until_valid() {
    let store = MemoryStore::new();
    let input = ScriptedInput::new(["", "Alice", "Alice", "  ", "Bob", "exit"]);
    let mut session = Session::new(input, Vec::new(), &store, config(1));
    session.new_game().expect("new game");

    let output = text(session.into_parts().1);
    assert_eq!(output.matches("Enter White Player name:").count(), 2);
    assert_eq!(output.matches("Enter Black Player name:").count(), 3);
    assert_eq!(output.matches("Name cannot be empty!").count(), 2);
    assert!(output.contains("Player Alice already exists!"));
    assert_eq!(store.all_players().expect("players"), players());
}

#[test]
fn test_input_closed_while_naming() {
    let store = MemoryStore::new();
    let mut session = Session::new(ScriptedInput::new(["Alice"]), Vec::new(), &store, config(1));
    assert!(matches!(
        session.new_game(),
        Err(SessionError::InputClosed)
    ));
}

#[test]
fn test_bad_input_reprompts() {
    let store = MemoryStore::new();
    let input = script(&[], &["zz", "c33", "a1", "f6", "c3", "c4", "d4", "exit"]);
    let mut session = Session::new(input, Vec::new(), &store, config(1));
    session.new_game().expect("new game");
    session.play().expect("play");

    let output = text(session.into_parts().1);
    assert!(output.contains("Invalid input! (expected a file a-h followed by a rank 1-8)"));
    assert!(output.contains("Invalid input! (expected two characters, such as c3)"));
    assert!(output.contains("Invalid checker: the checker on a1 has no legal move."));
    assert!(output.contains("Invalid checker: f6 is not one of your checkers."));
    assert!(output.contains("Invalid board spot! c3 -> c4 is not a legal move."));
    assert!(output.contains("Game over (game left)."));

    let moves = store.all_moves().expect("moves");
    assert_eq!(moves.len(), 1);
    assert_eq!(moves[0].player_name(), "Alice");
}

#[test]
fn test_chain_keeps_prompting_same_player() {
    let store = MemoryStore::new();
    let mut session = Session::new(
        script(&DOUBLE_JUMP_LINE[..6], &["b2"]),
        Vec::new(),
        &store,
        config(2),
    );
    session.new_game().expect("new game");
    session.play().expect("play");

    let output = text(session.into_parts().1);
    assert_eq!(output.matches("Another kill!").count(), 1);
    assert!(!output.contains("Invalid board spot!"));
    assert!(output.contains("Game over! Bob wins (capture limit reached)."));
    // Three turns each; Bob's last one is a double jump.
    assert_eq!(output.matches("Alice move.").count(), 3);
    assert_eq!(output.matches("Bob move.").count(), 3);

    let moves = store.all_moves().expect("moves");
    assert_eq!(moves.len(), 7);
    assert!(moves[5..].iter().all(|m| m.player_name() == "Bob"));
}

#[test]
fn test_double_jump_past_limit_keeps_playing() {
    let store = MemoryStore::new();
    let mut session = Session::new(
        script(&DOUBLE_JUMP_LINE[..6], &["b2", "e3", "f4", "exit"]),
        Vec::new(),
        &store,
        config(1),
    );
    session.new_game().expect("new game");
    session.play().expect("play");

    let output = text(session.into_parts().1);
    assert!(!output.contains("capture limit reached"));
    assert!(output.contains("Game over (game left)."));
    assert_eq!(output.matches("Alice move.").count(), 4);

    let moves = store.all_moves().expect("moves");
    assert_eq!(moves.len(), 8);
    assert_eq!(
        moves[7],
        Move::new(8, "Alice".into(), at("e3"), at("f4"), true)
    );
}

#[test]
fn test_end_of_input_leaves_game() {
    let store = MemoryStore::new();
    let mut session = Session::new(script(&[("c3", "d4")], &[]), Vec::new(), &store, config(1));
    session.new_game().expect("new game");
    session.play().expect("play");

    let (game, output) = session.into_parts();
    assert!(!game.expect("game loaded").is_active());
    assert!(text(output).contains("Game over (game left)."));
    assert_eq!(store.all_moves().expect("moves").len(), 1);
}

#[test]
fn test_play_without_game_fails() {
    let store = MemoryStore::new();
    let mut session = Session::new(ScriptedInput::default(), Vec::new(), &store, config(1));
    assert!(matches!(session.play(), Err(SessionError::NoGame)));
    assert!(matches!(session.play_turn(), Err(SessionError::NoGame)));
}

#[test]
fn test_continue_resumes_saved_game() {
    let saved = vec![
        Move::new(1, "Alice".into(), at("c3"), at("d4"), true),
        Move::new(2, "Bob".into(), at("b6"), at("c5"), false),
    ];
    let store = MemoryStore::with_contents(players(), saved);
    let input = ScriptedInput::new(["g3", "h4", "exit"]);
    let mut session = Session::new(input, Vec::new(), &store, config(1));

    let game = session.continue_game().expect("continue");
    assert_eq!(game.current_player().name(), "Alice");
    session.play().expect("play");

    let moves = store.all_moves().expect("moves");
    assert_eq!(moves.len(), 3);
    assert_eq!(
        moves[2],
        Move::new(3, "Alice".into(), at("g3"), at("h4"), true)
    );
}

#[test]
fn test_continue_reports_open_chain() {
    let log: Vec<Move> = DOUBLE_JUMP_LINE[..6]
        .iter()
        .enumerate()
        .map(|(i, (start, end))| {
            let is_white = i % 2 == 0;
            let name = if is_white { "Alice" } else { "Bob" };
            Move::new(i as u32 + 1, name.into(), at(start), at(end), is_white)
        })
        .collect();
    let store = MemoryStore::with_contents(players(), log);
    let input = ScriptedInput::new(["b2"]);
    let mut session = Session::new(input, Vec::new(), &store, config(2));

    session.continue_game().expect("continue");
    session.play().expect("play");

    let output = text(session.into_parts().1);
    assert!(output.contains("Bob must keep capturing from d4."));
    assert!(!output.contains("Which checker to move?"));
    assert!(output.contains("Game over! Bob wins (capture limit reached)."));
    assert_eq!(store.all_moves().expect("moves").len(), 7);
}

#[test]
fn test_continue_finished_game() {
    let log = vec![
        Move::new(1, "Alice".into(), at("c3"), at("d4"), true),
        Move::new(2, "Bob".into(), at("b6"), at("c5"), false),
        Move::new(3, "Alice".into(), at("d4"), at("b6"), true),
    ];
    let store = MemoryStore::with_contents(players(), log);
    let mut session = Session::new(ScriptedInput::default(), Vec::new(), &store, config(1));

    let game = session.continue_game().expect("continue");
    assert_eq!(game.status(), GameStatus::End);
    assert!(text(session.into_parts().1).contains("This game is already over."));
}

#[test]
fn test_continue_with_corrupt_log_fails() {
    let log = vec![Move::new(1, "Bob".into(), at("f6"), at("e5"), false)];
    let store = MemoryStore::with_contents(players(), log);
    let mut session = Session::new(ScriptedInput::default(), Vec::new(), &store, config(1));
    assert!(matches!(
        session.continue_game(),
        Err(SessionError::Replay(_))
    ));
}

#[test]
fn test_write_log_text_and_json() {
    let log = vec![Move::new(1, "Alice".into(), at("c3"), at("d4"), true)];
    let store = MemoryStore::with_contents(players(), log);

    let mut out = Vec::new();
    write_log(&store, &mut out, false).expect("text log");
    let out = text(out);
    assert!(out.contains("Players:"));
    assert!(out.contains("  Alice (White)"));
    assert!(out.contains("  #1 Alice (White): c3 -> d4"));

    let mut out = Vec::new();
    write_log(&store, &mut out, true).expect("json log");
    let doc: serde_json::Value = serde_json::from_slice(&out).expect("valid json");
    assert_eq!(doc["players"][1]["name"], "Bob");
    assert_eq!(doc["moves"][0]["start"], "c3");
    assert_eq!(doc["moves"][0]["end"], "d4");
}

#[test]
fn test_game_survives_restart_with_sqlite() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let db_path = dir
        .path()
        .join("checkers.db")
        .to_str()
        .expect("Invalid path")
        .to_string();

    {
        let repo = GameRepository::open(db_path.clone()).expect("Open failed");
        let input = script(&DOUBLE_JUMP_LINE[..6], &["exit"]);
        let mut session = Session::new(input, Vec::new(), &repo, config(2));
        session.new_game().expect("new game");
        session.play().expect("play");
        assert_eq!(repo.all_moves().expect("moves").len(), 6);
    }

    let repo = GameRepository::open(db_path).expect("Reopen failed");
    let mut session = Session::new(ScriptedInput::new(["b2"]), Vec::new(), &repo, config(2));
    let game = session.continue_game().expect("continue");
    assert_eq!(game.chain_from(), Some(at("d4")));
    assert_eq!(game.current_player().color(), &Color::Black);
    session.play().expect("play");

    let game = session.into_parts().0.expect("game loaded");
    assert_eq!(game.status(), GameStatus::End);
    assert_eq!(*game.roster().by_color(Color::Black).kills(), 2);
    assert_eq!(repo.all_moves().expect("moves").len(), 7);
    assert_eq!(
        repo.get_by_name("Alice").expect("lookup"),
        Some(Player::new("Alice", Color::White))
    );
}
