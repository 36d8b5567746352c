//! Integration test: leaderboard policy, storage and the session together

use chrono::{TimeZone, Utc};
use skyflap::core::constants::*;
use skyflap::core::GameConfig;
use skyflap::entities::{Enemy, Pipe};
use skyflap::leaderboard::{
    import_legacy, JsonFileStore, Leaderboard, LeaderboardEntry, LeaderboardStore, MemoryStore,
};
use skyflap::session::{GameSession, GameState, InputKind, TickEvent};
use std::fs;
use std::sync::Arc;

fn entry(name: &str, score: u32) -> LeaderboardEntry {
    LeaderboardEntry {
        name: name.to_string(),
        score,
        date: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
    }
}

fn quiet_config() -> GameConfig {
    GameConfig {
        power_up_chance: 0.0,
        enemy_chance: 0.0,
        power_pipe_chance: 0.0,
        ..Default::default()
    }
}

/// Put a pipe just in front of the bird so the next tick scores it.
fn pipe_about_to_pass(session: &mut GameSession) {
    session.bird.y = BIRD_START_Y;
    session.bird.velocity = 0.0;
    let id = session.ids.next_id();
    let mut pipe = Pipe::new(id, session.bird.y - 60.0, 2.0, false);
    pipe.x = session.bird.x - pipe.width + 1.0;
    session.pipes.push(pipe);
}

fn enter_name(session: &mut GameSession, name: &str) {
    assert_eq!(session.state, GameState::NameEntry);
    for c in name.chars() {
        session.handle_input(InputKind::TextChar(c));
    }
    session.handle_input(InputKind::StartOrConfirm);
}

/// Finish a run with `score` and return the session at the Over screen.
fn finish_run(session: &mut GameSession, score: u32) {
    session.handle_input(InputKind::StartOrConfirm);
    session.score = score;
    session.bird.y = SCREEN_HEIGHT;
    for _ in 0..400 {
        session.tick(FRAME_MS);
        if session.state == GameState::Over {
            return;
        }
    }
    panic!("run never reached Over");
}

#[test]
fn test_board_invariant_holds_after_many_inserts() {
    let mut board = Leaderboard::new(10);
    let scores = [5, 80, 13, 13, 42, 7, 99, 1, 64, 33, 21, 77, 2, 58];
    for (i, &s) in scores.iter().enumerate() {
        board.add(&format!("P{}", i), s, Utc::now());
        assert!(board.len() <= 10);
        assert!(board
            .entries()
            .windows(2)
            .all(|w| w[0].score >= w[1].score));
    }
    assert_eq!(board.top_score(), 99);
    assert_eq!(board.lowest_score(), Some(13));
}

#[test]
fn test_full_board_rejects_low_score_at_game_over() {
    let entries: Vec<_> = (0..10).map(|i| entry(&format!("N{}", i), 50 + i)).collect();
    let store = Arc::new(MemoryStore::with_entries(entries));
    let mut session = GameSession::new(quiet_config(), Arc::clone(&store), 1);

    finish_run(&mut session, 50);
    session.handle_input(InputKind::StartOrConfirm);
    assert_eq!(session.state, GameState::Leaderboard);
    assert_eq!(store.snapshot().len(), 10);
}

#[test]
fn test_full_board_accepts_score_above_lowest() {
    let entries: Vec<_> = (0..10).map(|i| entry(&format!("N{}", i), 50 + i)).collect();
    let store = Arc::new(MemoryStore::with_entries(entries));
    let mut session = GameSession::new(quiet_config(), Arc::clone(&store), 1);

    finish_run(&mut session, 51);
    session.handle_input(InputKind::StartOrConfirm);
    assert_eq!(session.state, GameState::NameEntry);
    for c in "Zed".chars() {
        session.handle_input(InputKind::TextChar(c));
    }
    session.handle_input(InputKind::StartOrConfirm);

    let saved = store.snapshot();
    assert_eq!(saved.len(), 10);
    assert_eq!(saved.last().map(|e| e.score), Some(51));
    assert!(saved.iter().any(|e| e.name == "Zed"));
    assert!(!saved.iter().any(|e| e.name == "N0"));
}

#[test]
fn test_beat_leader_fires_once_in_play() {
    let store = Arc::new(MemoryStore::with_entries(vec![entry("Top", 50)]));
    let mut session = GameSession::new(quiet_config(), store, 5);
    session.handle_input(InputKind::StartOrConfirm);

    let mut fired_at = Vec::new();
    for score in [49, 50, 51, 52] {
        session.score = score;
        session.bird.y = BIRD_START_Y;
        session.bird.velocity = 0.0;
        if session.tick(FRAME_MS).contains(&TickEvent::BeatLeader) {
            fired_at.push(score);
        }
    }
    assert_eq!(fired_at, vec![51]);
    assert!(session.snapshot().beat_leader_banner);
}

#[test]
fn test_beat_leader_through_real_pipe_passes() {
    let store = Arc::new(MemoryStore::with_entries(vec![entry("Top", 2)]));
    let mut session = GameSession::new(quiet_config(), store, 5);
    session.handle_input(InputKind::StartOrConfirm);

    let mut fired = 0;
    for _ in 0..4 {
        session.bird.y = BIRD_START_Y;
        session.bird.velocity = 0.0;
        let id = session.ids.next_id();
        let mut pipe = Pipe::new(id, session.bird.y - 60.0, 2.0, false);
        pipe.x = session.bird.x - pipe.width + 1.0;
        session.pipes.push(pipe);
        let events = session.tick(FRAME_MS);
        fired += events.iter().filter(|e| **e == TickEvent::BeatLeader).count();
    }
    assert_eq!(session.score, 4);
    assert_eq!(fired, 1);
}

#[test]
fn test_beat_leader_fires_on_boss_trigger_tick() {
    let store = Arc::new(MemoryStore::with_entries(vec![entry("Top", 9)]));
    let mut session = GameSession::new(quiet_config(), store, 5);
    session.handle_input(InputKind::StartOrConfirm);
    session.score = 9;
    pipe_about_to_pass(&mut session);

    let events = session.tick(FRAME_MS);
    assert_eq!(session.state, GameState::BossEncounterA);
    assert_eq!(session.score, 10);
    assert!(events.contains(&TickEvent::BeatLeader));
    assert_eq!(session.high_score, 10);
}

#[test]
fn test_beat_leader_fires_on_death_tick() {
    let store = Arc::new(MemoryStore::with_entries(vec![entry("Top", 4)]));
    let mut session = GameSession::new(quiet_config(), store, 5);
    session.handle_input(InputKind::StartOrConfirm);
    session.score = 4;
    pipe_about_to_pass(&mut session);
    let id = session.ids.next_id();
    session.enemies.push(Enemy {
        id,
        rect: session.bird.rect(),
        speed: 0.0,
    });

    let events = session.tick(FRAME_MS);
    assert_eq!(session.state, GameState::DeathSequence);
    assert_eq!(session.score, 5);
    assert!(events.contains(&TickEvent::BeatLeader));
}

#[test]
fn test_no_previous_leader_never_fires() {
    let mut session = GameSession::new(quiet_config(), MemoryStore::new(), 5);
    session.handle_input(InputKind::StartOrConfirm);
    session.score = 100;
    let events = session.tick(FRAME_MS);
    assert!(!events.contains(&TickEvent::BeatLeader));
}

#[test]
fn test_json_store_survives_sessions() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("leaderboard.json");

    let mut session = GameSession::new(quiet_config(), JsonFileStore::new(&path), 3);
    finish_run(&mut session, 7);
    session.handle_input(InputKind::StartOrConfirm);
    for c in "Kai".chars() {
        session.handle_input(InputKind::TextChar(c));
    }
    session.handle_input(InputKind::StartOrConfirm);
    assert!(path.exists());

    let reopened = GameSession::new(quiet_config(), JsonFileStore::new(&path), 4);
    assert_eq!(reopened.leaderboard.top_name(), Some("Kai"));
    assert_eq!(reopened.high_score, 7);
}

#[test]
fn test_corrupt_board_starts_empty() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("leaderboard.json");
    fs::write(&path, "definitely not json").unwrap();

    let session = GameSession::new(quiet_config(), JsonFileStore::new(&path), 1);
    assert!(session.leaderboard.is_empty());
    assert!(session.leaderboard.is_high_score(1));
}

#[test]
fn test_legacy_board_import_feeds_new_sessions() {
    let dir = tempfile::tempdir().unwrap();
    let legacy = dir.path().join("old.json");
    fs::write(
        &legacy,
        r#"[{"name": "Old", "score": 33, "date": "2022-07-04 10:00:00"}]"#,
    )
    .unwrap();
    let store = JsonFileStore::new(dir.path().join("leaderboard.json"));
    assert_eq!(import_legacy(&store, &legacy, 10).unwrap(), 1);
    assert_eq!(store.load().len(), 1);

    let session = GameSession::new(quiet_config(), store, 1);
    assert_eq!(session.leaderboard.top_score(), 33);
}

#[test]
fn test_overlapping_sessions_keep_each_others_entries() {
    let store = Arc::new(MemoryStore::new());
    let mut alice = GameSession::new(quiet_config(), Arc::clone(&store), 1);
    let mut bob = GameSession::new(quiet_config(), Arc::clone(&store), 2);

    finish_run(&mut alice, 5);
    finish_run(&mut bob, 3);
    alice.handle_input(InputKind::StartOrConfirm);
    bob.handle_input(InputKind::StartOrConfirm);
    enter_name(&mut alice, "Alice");
    enter_name(&mut bob, "Bob");

    let names: Vec<_> = store.snapshot().into_iter().map(|e| e.name).collect();
    assert_eq!(names, vec!["Alice", "Bob"]);
    assert_eq!(bob.leaderboard.top_name(), Some("Alice"));

    // Bob's next run races against Alice's score.
    bob.handle_input(InputKind::StartOrConfirm);
    bob.handle_input(InputKind::StartOrConfirm);
    assert_eq!(bob.state, GameState::Playing);
    bob.score = 6;
    bob.bird.y = BIRD_START_Y;
    bob.bird.velocity = 0.0;
    assert!(bob.tick(FRAME_MS).contains(&TickEvent::BeatLeader));
}

#[test]
fn test_full_board_check_sees_other_sessions_writes() {
    let entries: Vec<_> = (0..9).map(|i| entry(&format!("N{}", i), 50 + i)).collect();
    let store = Arc::new(MemoryStore::with_entries(entries));
    let mut early = GameSession::new(quiet_config(), Arc::clone(&store), 1);
    let mut late = GameSession::new(quiet_config(), Arc::clone(&store), 2);

    finish_run(&mut early, 70);
    early.handle_input(InputKind::StartOrConfirm);
    enter_name(&mut early, "Early");
    assert_eq!(store.snapshot().len(), 10);

    // The board filled up after `late` was created; 50 no longer qualifies.
    finish_run(&mut late, 50);
    late.handle_input(InputKind::StartOrConfirm);
    assert_eq!(late.state, GameState::Leaderboard);
}
