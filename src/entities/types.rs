//! Kinematic bodies: the bird, pipes, pickups, enemies and fireballs.
//!
//! Each body advances by its own rule once per tick. Positions are in
//! logical screen pixels with y growing downward.

use crate::core::constants::*;
use serde::{Deserialize, Serialize};

/// Axis-aligned rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
}

impl Rect {
    pub const fn new(x: f64, y: f64, w: f64, h: f64) -> Self {
        Self { x, y, w, h }
    }

    pub fn right(&self) -> f64 {
        self.x + self.w
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.h
    }

    pub fn center_y(&self) -> f64 {
        self.y + self.h / 2.0
    }

    /// Shrink by `margin` on every side. Never produces a negative size.
    pub fn inset(&self, margin: f64) -> Rect {
        let w = (self.w - margin * 2.0).max(0.0);
        let h = (self.h - margin * 2.0).max(0.0);
        Rect::new(self.x + margin, self.y + margin, w, h)
    }

    /// Strict overlap on both axes; touching edges do not intersect.
    pub fn intersects(&self, other: &Rect) -> bool {
        self.x < other.right()
            && self.right() > other.x
            && self.y < other.bottom()
            && self.bottom() > other.y
    }
}

// ── Bird ─────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bird {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    /// Vertical velocity in px/tick (positive = downward).
    pub velocity: f64,
    pub gravity: f64,
    /// Velocity override applied by a jump (negative = upward).
    pub jump_impulse: f64,

    pub shield_active: bool,
    pub shield_ticks: u32,

    /// Pipe that killed the bird, if any. The death fall slides into it.
    pub target_pipe: Option<u32>,
    pub is_falling_through: bool,
}

impl Default for Bird {
    fn default() -> Self {
        Self::new()
    }
}

impl Bird {
    pub fn new() -> Self {
        Self {
            x: BIRD_START_X,
            y: BIRD_START_Y,
            width: BIRD_SIZE,
            height: BIRD_SIZE,
            velocity: 0.0,
            gravity: BIRD_GRAVITY,
            jump_impulse: BIRD_JUMP_IMPULSE,
            shield_active: false,
            shield_ticks: 0,
            target_pipe: None,
            is_falling_through: false,
        }
    }

    /// One tick of flight: gravity, then position, then the shield timer.
    pub fn update(&mut self) {
        self.velocity += self.gravity;
        self.y += self.velocity;
        self.tick_shield();
    }

    /// Sets velocity to the jump impulse. Not additive.
    pub fn jump(&mut self) {
        self.velocity = self.jump_impulse;
    }

    pub fn activate_shield(&mut self, ticks: u32) {
        self.shield_active = ticks > 0;
        self.shield_ticks = ticks;
    }

    fn tick_shield(&mut self) {
        if !self.shield_active {
            return;
        }
        self.shield_ticks = self.shield_ticks.saturating_sub(1);
        if self.shield_ticks == 0 {
            self.shield_active = false;
        }
    }

    /// Visual bounds.
    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }

    /// Collision bounds, inset from the visual bounds.
    pub fn hitbox(&self) -> Rect {
        self.rect().inset(BIRD_HITBOX_INSET)
    }

    /// Keep a shielded bird on screen instead of letting it leave the playfield.
    pub fn clamp_to_screen(&mut self) {
        if self.y <= 0.0 {
            self.y = 0.0;
            self.velocity = self.velocity.max(0.0);
        }
        let floor = SCREEN_HEIGHT - self.height;
        if self.y >= floor {
            self.y = floor;
            self.velocity = self.velocity.min(0.0);
        }
    }

    /// Advance the death fall by one tick. Returns true once the bird has
    /// dropped below the bottom of the screen.
    ///
    /// With a target pipe the first call snaps the bird onto the pipe's
    /// column at the top of its gap; later calls drop it at a fixed speed
    /// while staying aligned. Without one the bird falls under gravity.
    pub fn fall_through(&mut self, target: Option<&Pipe>) -> bool {
        match target {
            Some(pipe) => {
                self.x = pipe.x + (pipe.width - self.width) / 2.0;
                if self.is_falling_through {
                    self.y += FALL_THROUGH_SPEED;
                } else {
                    self.is_falling_through = true;
                    self.y = pipe.top_height;
                }
            }
            None => {
                self.velocity += self.gravity;
                self.y += self.velocity;
            }
        }
        self.y > SCREEN_HEIGHT
    }
}

// ── Pipe ─────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pipe {
    pub id: u32,
    pub x: f64,
    /// Height of the top pipe; the gap starts here.
    pub top_height: f64,
    pub gap: f64,
    pub width: f64,
    pub speed: f64,
    pub is_moving: bool,
    /// Set once when the bird passes the right edge.
    pub scored: bool,
    pub is_power: bool,
    /// True while this power pipe's slowdown is running.
    pub power_effect_active: bool,
}

impl Pipe {
    pub fn new(id: u32, top_height: f64, speed: f64, is_power: bool) -> Self {
        Self {
            id,
            x: SCREEN_WIDTH,
            top_height,
            gap: PIPE_GAP,
            width: PIPE_WIDTH,
            speed,
            is_moving: true,
            scored: false,
            is_power,
            power_effect_active: false,
        }
    }

    pub fn update(&mut self) {
        if self.is_moving {
            self.x -= self.speed;
        }
    }

    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    pub fn bottom_y(&self) -> f64 {
        self.top_height + self.gap
    }

    pub fn gap_center(&self) -> f64 {
        self.top_height + self.gap / 2.0
    }

    pub fn top_rect(&self) -> Rect {
        Rect::new(self.x, 0.0, self.width, self.top_height)
    }

    pub fn bottom_rect(&self) -> Rect {
        let bottom_y = self.bottom_y();
        Rect::new(self.x, bottom_y, self.width, (SCREEN_HEIGHT - bottom_y).max(0.0))
    }

    pub fn is_off_screen(&self) -> bool {
        self.right() < 0.0
    }
}

// ── Pickups, enemies, projectiles ────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PowerUpKind {
    /// Timed immunity to lethal collisions.
    Shield,
    /// Starts the same slowdown window as a power pipe.
    SlowMotion,
    /// Flat score bonus.
    Points,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PowerUp {
    pub id: u32,
    pub kind: PowerUpKind,
    pub rect: Rect,
    pub speed: f64,
}

impl PowerUp {
    pub fn update(&mut self) {
        self.rect.x -= self.speed;
    }

    pub fn is_off_screen(&self) -> bool {
        self.rect.right() < 0.0
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Enemy {
    pub id: u32,
    pub rect: Rect,
    pub speed: f64,
}

impl Enemy {
    pub fn update(&mut self) {
        self.rect.x -= self.speed;
    }

    pub fn is_off_screen(&self) -> bool {
        self.rect.right() < 0.0
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Fireball {
    pub id: u32,
    pub rect: Rect,
    pub speed: f64,
}

impl Fireball {
    /// Launch from the bird's right edge at mid-height.
    pub fn from_bird(id: u32, bird: &Bird) -> Self {
        Self {
            id,
            rect: Rect::new(
                bird.x + bird.width,
                bird.y + bird.height / 2.0 - FIREBALL_HEIGHT / 2.0,
                FIREBALL_WIDTH,
                FIREBALL_HEIGHT,
            ),
            speed: FIREBALL_SPEED,
        }
    }

    pub fn update(&mut self) {
        self.rect.x += self.speed;
    }

    pub fn is_off_screen(&self) -> bool {
        self.rect.x > SCREEN_WIDTH
    }
}
