//! Death cutscene: a fixed-length explosion with screen shake, running
//! alongside the bird's fall.

use crate::core::constants::{DEATH_EXPLOSION_TICKS, DEATH_SHAKE_AMPLITUDE};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DeathCause {
    Boundary,
    Pipe,
    Enemy,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeathSequence {
    pub cause: DeathCause,
    /// Explosion ticks remaining.
    pub explosion_ticks: u32,
    /// Horizontal screen offset for this tick.
    pub shake_offset: f64,
    pub fall_complete: bool,
}

impl DeathSequence {
    pub fn new(cause: DeathCause) -> Self {
        Self {
            cause,
            explosion_ticks: DEATH_EXPLOSION_TICKS,
            shake_offset: shake_at(DEATH_EXPLOSION_TICKS),
            fall_complete: false,
        }
    }

    /// Count the explosion down by one tick.
    pub fn tick_explosion(&mut self) {
        self.explosion_ticks = self.explosion_ticks.saturating_sub(1);
        self.shake_offset = shake_at(self.explosion_ticks);
    }

    pub fn explosion_done(&self) -> bool {
        self.explosion_ticks == 0
    }

    pub fn is_finished(&self) -> bool {
        self.explosion_done() && self.fall_complete
    }
}

/// Alternating shake that decays with the explosion.
fn shake_at(remaining: u32) -> f64 {
    let magnitude = DEATH_SHAKE_AMPLITUDE * remaining as f64 / DEATH_EXPLOSION_TICKS as f64;
    if remaining % 2 == 0 {
        magnitude
    } else {
        -magnitude
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shake_decays_to_zero() {
        let mut death = DeathSequence::new(DeathCause::Pipe);
        assert!((death.shake_offset.abs() - DEATH_SHAKE_AMPLITUDE).abs() < 1e-9);
        let mut last = death.shake_offset.abs();
        while !death.explosion_done() {
            death.tick_explosion();
            assert!(death.shake_offset.abs() <= last);
            last = death.shake_offset.abs();
        }
        assert!(death.shake_offset.abs() < 1e-9);
    }

    #[test]
    fn test_finished_needs_both_halves() {
        let mut death = DeathSequence::new(DeathCause::Enemy);
        death.fall_complete = true;
        assert!(!death.is_finished());
        for _ in 0..DEATH_EXPLOSION_TICKS {
            death.tick_explosion();
        }
        assert!(death.is_finished());

        let mut death = DeathSequence::new(DeathCause::Boundary);
        for _ in 0..DEATH_EXPLOSION_TICKS {
            death.tick_explosion();
        }
        assert!(!death.is_finished());
    }
}
