//! Render-agnostic view of a session, cheap to serialize for the terminal
//! renderer and the WebSocket clients alike.

use super::death::DeathSequence;
use super::game::GameSession;
use super::types::GameState;
use crate::encounter::Encounter;
use crate::entities::{Bird, Enemy, Fireball, Pipe, PowerUp};
use crate::leaderboard::LeaderboardEntry;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameSnapshot {
    pub state: GameState,
    pub tick: u64,
    pub score: u32,
    pub high_score: u32,
    /// Difficulty as a multiple of the base speed.
    pub speed_level: f64,
    pub slowdown_active: bool,

    pub bird: Bird,
    pub pipes: Vec<Pipe>,
    pub power_ups: Vec<PowerUp>,
    pub enemies: Vec<Enemy>,
    pub fireballs: Vec<Fireball>,

    pub boss: Option<Encounter>,
    pub death: Option<DeathSequence>,
    /// Whole seconds left, only while counting down.
    pub countdown: Option<u32>,
    pub name_buffer: String,
    pub leaderboard: Vec<LeaderboardEntry>,
    pub beat_leader_banner: bool,
}

impl GameSession {
    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot {
            state: self.state,
            tick: self.ticks,
            score: self.score,
            high_score: self.high_score.max(self.score),
            speed_level: self.speed_level(),
            slowdown_active: self.slowdown.is_active(),
            bird: self.bird.clone(),
            pipes: self.pipes.clone(),
            power_ups: self.power_ups.clone(),
            enemies: self.enemies.clone(),
            fireballs: self.fireballs.clone(),
            boss: self.encounter.clone(),
            death: self.death.clone(),
            countdown: (self.state == GameState::Countdown).then(|| self.countdown_seconds()),
            name_buffer: self.name_buffer.clone(),
            leaderboard: self.leaderboard.entries().to_vec(),
            beat_leader_banner: self.beat_leader.banner_visible(),
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::core::GameConfig;
    use crate::leaderboard::MemoryStore;
    use crate::session::{GameSession, GameState, InputKind};

    #[test]
    fn test_snapshot_serializes_to_json() {
        let mut session = GameSession::new(GameConfig::default(), MemoryStore::new(), 7);
        session.handle_input(InputKind::StartOrConfirm);
        for _ in 0..120 {
            session.tick(16);
        }
        let snap = session.snapshot();
        let json = serde_json::to_string(&snap).unwrap();
        assert!(json.contains("\"state\""));
        assert!(json.contains("\"pipes\""));
        let back: super::GameSnapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(back.state, snap.state);
    }

    #[test]
    fn test_countdown_only_shown_while_counting() {
        let mut session = GameSession::new(GameConfig::default(), MemoryStore::new(), 1);
        assert!(session.snapshot().countdown.is_none());
        session.state = GameState::Countdown;
        session.countdown_remaining = 121;
        assert_eq!(session.snapshot().countdown, Some(3));
    }
}
