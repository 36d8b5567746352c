//! Time-gated obstacle spawning.
//!
//! Every spawn interval a new pipe enters at the right edge. The same roll
//! may also place a power-up and/or an enemy in the middle of its gap.

use crate::core::constants::*;
use crate::core::GameConfig;
use crate::entities::{Enemy, Pipe, PowerUp, PowerUpKind, Rect};
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Monotonic id source for every body a session creates.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EntityIds {
    next: u32,
}

impl EntityIds {
    pub fn next_id(&mut self) -> u32 {
        self.next = self.next.wrapping_add(1);
        self.next
    }
}

/// Accumulates frame time and fires once per spawn interval.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SpawnTimer {
    pub elapsed_ms: u64,
}

impl SpawnTimer {
    /// Add `dt_ms`; returns true (and restarts) once more than `interval_ms`
    /// has accumulated.
    pub fn advance(&mut self, dt_ms: u64, interval_ms: u64) -> bool {
        self.elapsed_ms += dt_ms;
        if self.elapsed_ms > interval_ms {
            self.elapsed_ms = 0;
            true
        } else {
            false
        }
    }

    pub fn reset(&mut self) {
        self.elapsed_ms = 0;
    }
}

/// Everything produced by one spawn.
#[derive(Debug, Clone)]
pub struct SpawnWave {
    pub pipe: Pipe,
    pub power_up: Option<PowerUp>,
    pub enemy: Option<Enemy>,
}

/// Top-pipe height, uniform over whole pixels so the gap keeps its margins.
pub fn random_top_height<R: Rng>(rng: &mut R) -> f64 {
    let min = PIPE_MIN_MARGIN as u32;
    let max = (SCREEN_HEIGHT - PIPE_GAP - PIPE_MIN_MARGIN) as u32;
    rng.gen_range(min..=max) as f64
}

fn random_power_up_kind<R: Rng>(rng: &mut R) -> PowerUpKind {
    match rng.gen_range(0..10) {
        0..=5 => PowerUpKind::Shield,
        6..=7 => PowerUpKind::SlowMotion,
        _ => PowerUpKind::Points,
    }
}

/// Rectangle of `size` centered on the pipe's gap.
fn gap_slot(pipe: &Pipe, size: f64) -> Rect {
    Rect::new(
        pipe.x + pipe.width / 2.0 - size / 2.0,
        pipe.gap_center() - size / 2.0,
        size,
        size,
    )
}

/// Roll a new pipe and its optional pickups, all moving at `speed`.
pub fn spawn_wave<R: Rng>(
    rng: &mut R,
    config: &GameConfig,
    speed: f64,
    ids: &mut EntityIds,
) -> SpawnWave {
    let top_height = random_top_height(rng);
    let is_power = rng.gen_bool(config.power_pipe_chance);
    let pipe = Pipe::new(ids.next_id(), top_height, speed, is_power);

    let power_up = rng.gen_bool(config.power_up_chance).then(|| PowerUp {
        id: ids.next_id(),
        kind: random_power_up_kind(rng),
        rect: gap_slot(&pipe, POWER_UP_SIZE),
        speed,
    });

    let enemy = rng.gen_bool(config.enemy_chance).then(|| Enemy {
        id: ids.next_id(),
        rect: gap_slot(&pipe, ENEMY_SIZE),
        speed,
    });

    SpawnWave {
        pipe,
        power_up,
        enemy,
    }
}
