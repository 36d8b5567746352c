//! Per-tick update for every timed state.
//!
//! Playing runs in a fixed order: bird, timers, spawning, pipes and
//! scoring, power-ups, enemies, fireballs, lethal collisions, leader check,
//! then culling. A boss trigger or a death ends the tick early.

use super::death::DeathCause;
use super::game::GameSession;
use super::types::*;
use crate::collision;
use crate::core::constants::*;
use crate::encounter::BossVariant;
use crate::entities::PowerUpKind;
use crate::scoring;
use crate::spawner;

impl GameSession {
    /// Advance one frame. `dt_ms` only feeds the spawn timer and is capped
    /// so a stalled frame cannot release a burst of pipes; everything else
    /// is counted in ticks.
    pub fn tick(&mut self, dt_ms: u64) -> TickEvents {
        let dt_ms = dt_ms.min(MAX_TICK_DT_MS);
        self.ticks += 1;
        match self.state {
            GameState::Playing => self.tick_playing(dt_ms),
            GameState::DeathSequence => self.tick_death(),
            GameState::BossEncounterA | GameState::BossEncounterB => self.tick_encounter(),
            GameState::Countdown => self.tick_countdown(),
            GameState::Start | GameState::Over | GameState::NameEntry | GameState::Leaderboard => {}
        }
        std::mem::take(&mut self.pending)
    }

    fn tick_playing(&mut self, dt_ms: u64) {
        self.beat_leader.tick_banner();
        let still_playing = self.advance_bodies(dt_ms);

        // Also on ticks that start a boss or end in a death.
        if self.beat_leader.check(self.score) {
            tracing::info!("New leader at {} points", self.score);
            self.pending.push(TickEvent::BeatLeader);
        }
        self.high_score = self.high_score.max(self.score);

        if still_playing {
            self.pipes.retain(|p| !p.is_off_screen());
            self.power_ups.retain(|p| !p.is_off_screen());
            self.enemies.retain(|e| !e.is_off_screen());
            self.fireballs.retain(|f| !f.is_off_screen());
        }
    }

    /// Move and resolve everything for one Playing tick. Returns false when
    /// the tick handed over to a boss encounter or a death.
    fn advance_bodies(&mut self, dt_ms: u64) -> bool {
        self.bird.update();
        if self.bird.shield_active && collision::out_of_bounds(&self.bird) {
            self.bird.clamp_to_screen();
        }
        if self.slowdown.tick() {
            self.end_slowdown();
        }

        if self
            .spawn_timer
            .advance(dt_ms, self.config.pipe_spawn_interval_ms)
        {
            self.spawn();
        }

        if let Some(variant) = self.update_pipes() {
            self.start_encounter(variant);
            return false;
        }
        self.update_power_ups();
        if !self.update_enemies() {
            return false;
        }
        self.update_fireballs();

        if !self.bird.shield_active {
            if collision::out_of_bounds(&self.bird) {
                self.die(DeathCause::Boundary, None);
                return false;
            }
            if let Some(id) = collision::first_pipe_hit(&self.bird, &self.pipes) {
                self.die(DeathCause::Pipe, Some(id));
                return false;
            }
        }
        true
    }

    fn spawn(&mut self) {
        let speed = self.current_speed();
        let wave = spawner::spawn_wave(&mut self.rng, &self.config, speed, &mut self.ids);
        tracing::trace!(
            "Spawned pipe {} (top {}, power {})",
            wave.pipe.id,
            wave.pipe.top_height,
            wave.pipe.is_power
        );
        self.pipes.push(wave.pipe);
        self.power_ups.extend(wave.power_up);
        self.enemies.extend(wave.enemy);
    }

    /// Move pipes and score the ones the bird just cleared. Returns a boss
    /// to start when a pass lands exactly on its trigger score.
    fn update_pipes(&mut self) -> Option<BossVariant> {
        let mut boss = None;
        let mut power_passed = false;
        let mut scored = false;

        for pipe in &mut self.pipes {
            pipe.update();
            if !scoring::passed_pipe(&self.bird, pipe) {
                continue;
            }
            pipe.scored = true;
            scored = true;
            self.score += 1;
            if boss.is_none() {
                boss = BossVariant::for_score(self.score)
                    .filter(|v| !self.bosses_triggered.contains(v));
            }

            let mut bonus = 0;
            if pipe.is_power {
                bonus = self.config.power_pipe_bonus;
                self.score += bonus;
                pipe.power_effect_active = true;
                power_passed = true;
            }
            self.pending.push(TickEvent::PipePassed { bonus });
        }

        if power_passed {
            scoring::halve_moving_pipes(&mut self.pipes);
            self.slowdown.start(self.config.slowdown_ticks);
            self.pending.push(TickEvent::PowerPipeActivated);
        }
        if scored {
            self.sync_speeds();
        }
        boss
    }

    fn update_power_ups(&mut self) {
        let bird_rect = self.bird.rect();
        let mut collected = Vec::new();
        self.power_ups.retain_mut(|p| {
            p.update();
            if p.rect.intersects(&bird_rect) {
                collected.push(p.kind);
                false
            } else {
                true
            }
        });

        for kind in collected {
            match kind {
                PowerUpKind::Shield => self.bird.activate_shield(self.config.shield_ticks),
                PowerUpKind::SlowMotion => {
                    self.slowdown.start(self.config.slowdown_ticks);
                    self.sync_speeds();
                }
                PowerUpKind::Points => {
                    self.score += self.config.points_power_up_bonus;
                    self.sync_speeds();
                }
            }
            self.pending.push(TickEvent::PowerUpCollected(kind));
        }
    }

    /// Move enemies and resolve contact with the bird. Returns false when
    /// the bird died.
    fn update_enemies(&mut self) -> bool {
        let hitbox = self.bird.hitbox();
        let mut rammed = 0;
        let mut fatal = false;
        let shielded = self.bird.shield_active;

        self.enemies.retain_mut(|e| {
            e.update();
            if fatal || !e.rect.intersects(&hitbox) {
                return true;
            }
            if shielded {
                rammed += 1;
                false
            } else {
                fatal = true;
                true
            }
        });

        for _ in 0..rammed {
            self.pending.push(TickEvent::ShieldBlocked);
        }
        if fatal {
            self.die(DeathCause::Enemy, None);
            return false;
        }
        true
    }

    fn update_fireballs(&mut self) {
        for fireball in &mut self.fireballs {
            fireball.update();
        }

        let mut kills = 0;
        let enemies = &mut self.enemies;
        self.fireballs.retain(|f| {
            match enemies.iter().position(|e| e.rect.intersects(&f.rect)) {
                Some(hit) => {
                    enemies.remove(hit);
                    kills += 1;
                    false
                }
                None => true,
            }
        });

        if kills > 0 {
            self.score += self.config.enemy_kill_bonus * kills;
            for _ in 0..kills {
                self.pending.push(TickEvent::EnemyKilled);
            }
            self.sync_speeds();
        }
    }

    fn end_slowdown(&mut self) {
        for pipe in &mut self.pipes {
            pipe.power_effect_active = false;
        }
        self.sync_speeds();
        self.pending.push(TickEvent::SlowdownEnded);
    }

    /// Bring every moving obstacle to the current speed.
    fn sync_speeds(&mut self) {
        let speed = self.current_speed();
        scoring::sync_pipe_speeds(&mut self.pipes, speed);
        for p in &mut self.power_ups {
            p.speed = speed;
        }
        for e in &mut self.enemies {
            e.speed = speed;
        }
    }

    fn tick_death(&mut self) {
        let Some(death) = self.death.as_mut() else {
            self.set_state(GameState::Over);
            return;
        };
        death.tick_explosion();
        if !death.fall_complete {
            let target = self
                .bird
                .target_pipe
                .and_then(|id| self.pipes.iter().find(|p| p.id == id));
            death.fall_complete = self.bird.fall_through(target);
        }
        if death.is_finished() {
            self.pending.push(TickEvent::RunOver { score: self.score });
            self.set_state(GameState::Over);
        }
    }

    fn tick_encounter(&mut self) {
        let Some(encounter) = self.encounter.as_mut() else {
            self.start_countdown();
            return;
        };
        if !encounter.update(&mut self.rng) {
            return;
        }
        let variant = encounter.variant;
        let bonus = variant.victory_bonus();
        self.encounter = None;
        self.score += bonus;
        self.high_score = self.high_score.max(self.score);
        self.pending.push(TickEvent::BossDefeated { variant, bonus });
        self.start_countdown();
    }

    fn tick_countdown(&mut self) {
        self.countdown_remaining = self.countdown_remaining.saturating_sub(1);
        if self.countdown_remaining == 0 {
            self.pending.push(TickEvent::CountdownFinished);
            self.set_state(GameState::Playing);
        }
    }
}
