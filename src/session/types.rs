use super::death::DeathCause;
use crate::encounter::BossVariant;
use crate::entities::PowerUpKind;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameState {
    Start,
    Playing,
    DeathSequence,
    BossEncounterA,
    BossEncounterB,
    Countdown,
    /// Run finished; waits for a confirm press.
    Over,
    NameEntry,
    Leaderboard,
}

impl GameState {
    pub fn for_boss(variant: BossVariant) -> Self {
        match variant {
            BossVariant::Gatekeeper => GameState::BossEncounterA,
            BossVariant::Warden => GameState::BossEncounterB,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InputKind {
    Jump,
    Fire,
    StartOrConfirm,
    TextChar(char),
    Backspace,
}

/// Something noteworthy that happened during a tick or an input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum TickEvent {
    RunStarted,
    Jumped,
    FireballLaunched,
    /// A pipe was passed; `bonus` is any extra from a power pipe.
    PipePassed { bonus: u32 },
    PowerPipeActivated,
    PowerUpCollected(PowerUpKind),
    EnemyKilled,
    /// A shielded bird rammed an enemy.
    ShieldBlocked,
    SlowdownEnded,
    Died(DeathCause),
    RunOver { score: u32 },
    BossStarted(BossVariant),
    BossDefeated { variant: BossVariant, bonus: u32 },
    CountdownFinished,
    BeatLeader,
    NameSubmitted { name: String, rank: Option<usize> },
}

/// Events from one tick, in the order they happened.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TickEvents(Vec<TickEvent>);

impl TickEvents {
    pub fn push(&mut self, event: TickEvent) {
        self.0.push(event);
    }

    pub fn iter(&self) -> impl Iterator<Item = &TickEvent> {
        self.0.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn contains(&self, event: &TickEvent) -> bool {
        self.0.contains(event)
    }

    pub fn any(&self, pred: impl Fn(&TickEvent) -> bool) -> bool {
        self.0.iter().any(pred)
    }

    pub fn into_vec(self) -> Vec<TickEvent> {
        self.0
    }
}
