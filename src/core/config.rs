//! Tunable game configuration.
//!
//! Geometry lives in [`crate::core::constants`]; everything a balance pass
//! might want to change lives here and can be overridden from
//! `~/.skyflap/config.json`. Missing fields fall back to their defaults.

use crate::utils::persistence;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Milliseconds of play between pipe spawns.
    pub pipe_spawn_interval_ms: u64,
    /// Chance that a freshly spawned pipe carries a power-up.
    pub power_up_chance: f64,
    /// Chance that a freshly spawned pipe carries an enemy.
    pub enemy_chance: f64,
    /// Chance that a pipe is a power pipe.
    pub power_pipe_chance: f64,

    /// Obstacle speed at score 0 (px/tick).
    pub base_speed: f64,
    /// Speed added every `speed_threshold` points.
    pub speed_step: f64,
    /// Points per difficulty step.
    pub speed_threshold: u32,

    pub shield_ticks: u32,
    pub slowdown_ticks: u32,
    pub countdown_ticks: u32,

    pub power_pipe_bonus: u32,
    pub enemy_kill_bonus: u32,
    /// Score granted by a points power-up.
    pub points_power_up_bonus: u32,

    pub max_leaderboard_entries: usize,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            pipe_spawn_interval_ms: 1500,
            power_up_chance: 0.5,
            enemy_chance: 0.2,
            power_pipe_chance: 0.1,

            base_speed: 2.0,
            speed_step: 0.25,
            speed_threshold: 10,

            shield_ticks: 300,
            slowdown_ticks: 180,
            countdown_ticks: 180,

            power_pipe_bonus: 2,
            enemy_kill_bonus: 2,
            points_power_up_bonus: 5,

            max_leaderboard_entries: 10,
        }
    }
}

impl GameConfig {
    /// Load `config.json` from the data directory, falling back to defaults.
    pub fn load_default() -> Self {
        persistence::load_json_or_default::<GameConfig>(crate::core::CONFIG_FILE).sanitized()
    }

    /// Load a config from an explicit path. Unreadable or malformed files
    /// produce the defaults.
    pub fn load_from(path: &Path) -> Self {
        let parsed = fs::read_to_string(path)
            .map_err(|e| e.to_string())
            .and_then(|json| serde_json::from_str::<GameConfig>(&json).map_err(|e| e.to_string()));
        match parsed {
            Ok(config) => config.sanitized(),
            Err(e) => {
                tracing::warn!("Could not read config {}: {}. Using defaults.", path.display(), e);
                Self::default()
            }
        }
    }

    /// Clamp out-of-range values so the simulation stays total.
    pub fn sanitized(mut self) -> Self {
        let defaults = Self::default();
        for (name, chance) in [
            ("power_up_chance", &mut self.power_up_chance),
            ("enemy_chance", &mut self.enemy_chance),
            ("power_pipe_chance", &mut self.power_pipe_chance),
        ] {
            if !(0.0..=1.0).contains(chance) {
                tracing::warn!("{} ({}) outside [0, 1]; clamping.", name, chance);
                *chance = chance.clamp(0.0, 1.0);
            }
        }
        if self.speed_threshold == 0 {
            tracing::warn!("speed_threshold must be positive. Falling back to default.");
            self.speed_threshold = defaults.speed_threshold;
        }
        if self.base_speed <= 0.0 {
            tracing::warn!("base_speed must be positive. Falling back to default.");
            self.base_speed = defaults.base_speed;
        }
        if !(self.speed_step >= 0.0) {
            tracing::warn!("speed_step ({}) must not be negative; using 0.", self.speed_step);
            self.speed_step = 0.0;
        }
        if self.pipe_spawn_interval_ms == 0 {
            self.pipe_spawn_interval_ms = defaults.pipe_spawn_interval_ms;
        }
        if self.max_leaderboard_entries == 0 {
            self.max_leaderboard_entries = defaults.max_leaderboard_entries;
        }
        self
    }
}
