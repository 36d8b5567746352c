//! Scripted player used by the simulator.
//!
//! Flies toward the center of the next gap and shoots any enemy lined up
//! ahead of it. Far from perfect, which is the point: it gives the balance
//! numbers something human-shaped to chew on.

use crate::core::constants::SCREEN_HEIGHT;
use crate::session::{GameSession, GameState, InputKind};

/// How far below the gap target the bird may sink before flapping.
const FLAP_SLACK: f64 = 15.0;
/// Horizontal range at which enemies are worth a fireball.
const FIRE_RANGE: f64 = 220.0;

#[derive(Debug, Clone, Default)]
pub struct Autopilot;

impl Autopilot {
    pub fn new() -> Self {
        Self
    }

    /// Input to send this frame, if any.
    pub fn decide(&self, session: &GameSession) -> Option<InputKind> {
        match session.state {
            GameState::Start => Some(InputKind::StartOrConfirm),
            GameState::Playing => self.decide_playing(session),
            _ => None,
        }
    }

    fn decide_playing(&self, session: &GameSession) -> Option<InputKind> {
        let bird = &session.bird;

        if session.fireballs.is_empty() {
            let lined_up = session.enemies.iter().any(|e| {
                let dx = e.rect.x - (bird.x + bird.width);
                dx > 0.0 && dx < FIRE_RANGE && e.rect.y < bird.y + bird.height && e.rect.bottom() > bird.y
            });
            if lined_up {
                return Some(InputKind::Fire);
            }
        }

        let target_center = session
            .pipes
            .iter()
            .filter(|p| p.right() > bird.x)
            .min_by(|a, b| a.x.total_cmp(&b.x))
            .map_or(SCREEN_HEIGHT / 2.0, |p| p.gap_center());
        let target_y = target_center - bird.height / 2.0;

        (bird.y > target_y + FLAP_SLACK && bird.velocity >= 0.0).then_some(InputKind::Jump)
    }
}
