//! Score rules and the score-derived difficulty curve.
//!
//! Difficulty is stepwise linear: every `speed_threshold` points the
//! obstacle speed grows by `speed_step`. A power pipe (or a slow-motion
//! pickup) opens a slowdown window during which obstacles move at half
//! speed.

use crate::core::constants::MIN_SLOWED_PIPE_SPEED;
use crate::core::GameConfig;
use crate::entities::{Bird, Pipe};
use serde::{Deserialize, Serialize};

/// Obstacle speed for a score: `base + step * floor(score / threshold)`.
pub fn difficulty_speed(score: u32, config: &GameConfig) -> f64 {
    let steps = score / config.speed_threshold.max(1);
    config.base_speed + config.speed_step * steps as f64
}

/// Speed expressed as a multiple of the base speed (shown as "Speed: 1.25x").
pub fn speed_level(score: u32, config: &GameConfig) -> f64 {
    difficulty_speed(score, config) / config.base_speed
}

/// Half speed, never below the slowdown floor.
pub fn slowed(speed: f64) -> f64 {
    (speed * 0.5).max(MIN_SLOWED_PIPE_SPEED)
}

/// True the first tick the bird is strictly past the pipe's right edge.
pub fn passed_pipe(bird: &Bird, pipe: &Pipe) -> bool {
    !pipe.scored && bird.x > pipe.right()
}

/// Remaining ticks of a slowdown window.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Slowdown {
    pub ticks_remaining: u32,
}

impl Slowdown {
    pub fn is_active(&self) -> bool {
        self.ticks_remaining > 0
    }

    /// Start (or restart) the window.
    pub fn start(&mut self, ticks: u32) {
        self.ticks_remaining = ticks;
    }

    /// Count down one tick. Returns true on the tick the window closes.
    pub fn tick(&mut self) -> bool {
        if self.ticks_remaining == 0 {
            return false;
        }
        self.ticks_remaining -= 1;
        self.ticks_remaining == 0
    }
}

/// Speed new and synchronized obstacles should move at right now.
pub fn current_speed(score: u32, slowdown: &Slowdown, config: &GameConfig) -> f64 {
    let speed = difficulty_speed(score, config);
    if slowdown.is_active() {
        slowed(speed)
    } else {
        speed
    }
}

/// Halve every moving pipe's own speed.
pub fn halve_moving_pipes(pipes: &mut [Pipe]) {
    for pipe in pipes.iter_mut().filter(|p| p.is_moving) {
        pipe.speed = slowed(pipe.speed);
    }
}

/// Set every moving pipe that is not running its own power effect to `speed`.
pub fn sync_pipe_speeds(pipes: &mut [Pipe], speed: f64) {
    for pipe in pipes
        .iter_mut()
        .filter(|p| p.is_moving && !p.power_effect_active)
    {
        pipe.speed = speed;
    }
}
