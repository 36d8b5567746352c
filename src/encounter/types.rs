//! Boss encounter data: which boss, which phase, and the two health pools.

use crate::core::constants::*;
use serde::{Deserialize, Serialize};

/// The two scripted bosses, keyed by the score that summons them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BossVariant {
    /// Summoned at 10 points.
    Gatekeeper,
    /// Summoned at 30 points.
    Warden,
}

impl BossVariant {
    pub const ALL: [BossVariant; 2] = [BossVariant::Gatekeeper, BossVariant::Warden];

    pub fn name(&self) -> &'static str {
        match self {
            Self::Gatekeeper => "Gatekeeper",
            Self::Warden => "Warden",
        }
    }

    /// Score that summons this boss (exact match when a pipe is passed).
    pub fn trigger_score(&self) -> u32 {
        match self {
            Self::Gatekeeper => 10,
            Self::Warden => 30,
        }
    }

    /// Boss whose trigger score is exactly `score`.
    pub fn for_score(score: u32) -> Option<Self> {
        Self::ALL.into_iter().find(|v| v.trigger_score() == score)
    }

    pub fn boss_hp(&self) -> u32 {
        match self {
            Self::Gatekeeper => 100,
            Self::Warden => 150,
        }
    }

    /// Damage the player deals per exchange.
    pub fn player_damage(&self) -> u32 {
        match self {
            Self::Gatekeeper => 20,
            Self::Warden => 25,
        }
    }

    /// Damage the boss deals when its counterattack lands.
    pub fn boss_damage(&self) -> u32 {
        match self {
            Self::Gatekeeper => 15,
            Self::Warden => 20,
        }
    }

    /// Ticks between attack exchanges.
    pub fn attack_interval_ticks(&self) -> u32 {
        match self {
            Self::Gatekeeper => 45,
            Self::Warden => 40,
        }
    }

    /// Chance the boss's counterattack misses.
    pub fn miss_chance(&self) -> f64 {
        match self {
            Self::Gatekeeper => 0.5,
            Self::Warden => 0.4,
        }
    }

    /// Flat score bonus for winning.
    pub fn victory_bonus(&self) -> u32 {
        match self {
            Self::Gatekeeper => 5,
            Self::Warden => 10,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EncounterPhase {
    /// Boss slides in from the right edge.
    Entry,
    /// Timed attack exchanges.
    Exchange,
    /// Boss defeated; victory pose.
    Victory,
    Done,
}

/// Result of the most recent attack exchange.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExchangeOutcome {
    pub damage_dealt: u32,
    /// `None` when the boss's counterattack missed or never came.
    pub damage_taken: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Encounter {
    pub variant: BossVariant,
    pub phase: EncounterPhase,
    /// Ticks spent in the current phase.
    pub phase_ticks: u32,
    pub boss_hp: u32,
    pub boss_max_hp: u32,
    pub player_hp: u32,
    /// Horizontal boss position during the entry slide.
    pub boss_x: f64,
    pub exchanges: u32,
    pub last_exchange: Option<ExchangeOutcome>,
}

/// Where the boss stops after sliding in.
pub const BOSS_ARENA_X: f64 = SCREEN_WIDTH * 0.65;

impl Encounter {
    pub fn new(variant: BossVariant) -> Self {
        Self {
            variant,
            phase: EncounterPhase::Entry,
            phase_ticks: 0,
            boss_hp: variant.boss_hp(),
            boss_max_hp: variant.boss_hp(),
            player_hp: ENCOUNTER_PLAYER_HP,
            boss_x: SCREEN_WIDTH,
            exchanges: 0,
            last_exchange: None,
        }
    }

    pub fn is_done(&self) -> bool {
        self.phase == EncounterPhase::Done
    }
}
