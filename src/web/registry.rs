//! Live sessions for the WebSocket server.
//!
//! Every connection owns one [`GameSession`] behind its own lock. A single
//! scheduler task ticks all of them at the frame rate while holding the
//! registry lock, so a disconnect can never drop a session mid-tick.

use crate::core::GameConfig;
use crate::leaderboard::LeaderboardStore;
use crate::session::{GameSession, GameSnapshot, InputKind, TickEvent};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::Mutex;
use uuid::Uuid;

/// A session plus the events it produced since the client last looked.
pub struct LiveSession {
    pub game: GameSession,
    pub events: Vec<TickEvent>,
}

pub type SharedSession = Arc<Mutex<LiveSession>>;

/// What the server pushes to a client.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerFrame {
    pub session_id: Uuid,
    pub snapshot: GameSnapshot,
    pub events: Vec<TickEvent>,
}

/// Client messages: `{"action": "jump"}`, `{"action": "char", "ch": "A"}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "lowercase")]
pub enum ClientAction {
    Jump,
    Fire,
    Start,
    Char { ch: char },
    Backspace,
}

impl From<ClientAction> for InputKind {
    fn from(action: ClientAction) -> Self {
        match action {
            ClientAction::Jump => InputKind::Jump,
            ClientAction::Fire => InputKind::Fire,
            ClientAction::Start => InputKind::StartOrConfirm,
            ClientAction::Char { ch } => InputKind::TextChar(ch),
            ClientAction::Backspace => InputKind::Backspace,
        }
    }
}

pub fn parse_action(text: &str) -> Option<InputKind> {
    serde_json::from_str::<ClientAction>(text)
        .ok()
        .map(InputKind::from)
}

pub struct SessionRegistry {
    sessions: Mutex<HashMap<Uuid, SharedSession>>,
    config: GameConfig,
    store: Arc<dyn LeaderboardStore>,
}

impl SessionRegistry {
    /// All sessions share `store`, so names submitted from one browser show
    /// up on boards created afterwards.
    pub fn new(config: GameConfig, store: Arc<dyn LeaderboardStore>) -> Self {
        Self {
            sessions: Mutex::new(HashMap::new()),
            config,
            store,
        }
    }

    pub async fn create(&self) -> (Uuid, SharedSession) {
        let id = Uuid::new_v4();
        let game = GameSession::new(self.config.clone(), Arc::clone(&self.store), rand::random());
        let session = Arc::new(Mutex::new(LiveSession {
            game,
            events: Vec::new(),
        }));
        self.sessions.lock().await.insert(id, Arc::clone(&session));
        tracing::info!("Session {} created", id);
        (id, session)
    }

    /// Drop a session. Waits for any tick in progress to finish.
    pub async fn remove(&self, id: Uuid) {
        if self.sessions.lock().await.remove(&id).is_some() {
            tracing::info!("Session {} removed", id);
        }
    }

    pub async fn len(&self) -> usize {
        self.sessions.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    /// Advance every live session by one frame.
    pub async fn tick_all(&self, dt_ms: u64) {
        let sessions = self.sessions.lock().await;
        for session in sessions.values() {
            let mut live = session.lock().await;
            let events = live.game.tick(dt_ms);
            live.events.extend(events.into_vec());
        }
    }
}

impl LiveSession {
    /// Current snapshot plus every event since the previous call.
    pub fn take_frame(&mut self, session_id: Uuid) -> ServerFrame {
        ServerFrame {
            session_id,
            snapshot: self.game.snapshot(),
            events: std::mem::take(&mut self.events),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::leaderboard::MemoryStore;
    use crate::session::GameState;

    fn registry() -> SessionRegistry {
        SessionRegistry::new(GameConfig::default(), Arc::new(MemoryStore::new()))
    }

    #[test]
    fn test_parse_actions() {
        assert_eq!(parse_action(r#"{"action":"jump"}"#), Some(InputKind::Jump));
        assert_eq!(parse_action(r#"{"action":"fire"}"#), Some(InputKind::Fire));
        assert_eq!(
            parse_action(r#"{"action":"start"}"#),
            Some(InputKind::StartOrConfirm)
        );
        assert_eq!(
            parse_action(r#"{"action":"char","ch":"Z"}"#),
            Some(InputKind::TextChar('Z'))
        );
        assert_eq!(
            parse_action(r#"{"action":"backspace"}"#),
            Some(InputKind::Backspace)
        );
        assert_eq!(parse_action(r#"{"action":"dance"}"#), None);
        assert_eq!(parse_action("not json"), None);
    }

    #[tokio::test]
    async fn test_sessions_are_isolated() {
        let registry = registry();
        let (_, a) = registry.create().await;
        let (_, b) = registry.create().await;
        assert_eq!(registry.len().await, 2);

        a.lock().await.game.handle_input(InputKind::StartOrConfirm);
        registry.tick_all(16).await;

        assert_eq!(a.lock().await.game.state, GameState::Playing);
        assert_eq!(b.lock().await.game.state, GameState::Start);
    }

    #[tokio::test]
    async fn test_remove_stops_ticking() {
        let registry = registry();
        let (id, session) = registry.create().await;
        registry.tick_all(16).await;
        registry.remove(id).await;
        assert!(registry.is_empty().await);

        let before = session.lock().await.game.ticks;
        registry.tick_all(16).await;
        assert_eq!(session.lock().await.game.ticks, before);
    }

    #[tokio::test]
    async fn test_frames_drain_events() {
        let registry = registry();
        let (id, session) = registry.create().await;
        session.lock().await.game.handle_input(InputKind::StartOrConfirm);
        registry.tick_all(16).await;

        let frame = session.lock().await.take_frame(id);
        assert_eq!(frame.session_id, id);
        assert!(frame.events.contains(&TickEvent::RunStarted));
        assert!(session.lock().await.take_frame(id).events.is_empty());
    }
}
