//! Game state machine.
//!
//! A [`GameSession`] owns one run's worth of state. Drivers feed it inputs
//! with [`GameSession::handle_input`], advance it once per frame with
//! [`GameSession::tick`], and render whatever [`GameSession::snapshot`]
//! returns. Nothing in here blocks or performs I/O except persisting the
//! leaderboard after a name is submitted.

pub mod death;
pub mod game;
pub mod logic;
pub mod snapshot;
pub mod types;

pub use death::{DeathCause, DeathSequence};
pub use game::GameSession;
pub use snapshot::GameSnapshot;
pub use types::*;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::constants::*;
    use crate::core::GameConfig;
    use crate::entities::{Enemy, Pipe, PowerUp, PowerUpKind, Rect};
    use crate::leaderboard::MemoryStore;

    fn quiet_config() -> GameConfig {
        GameConfig {
            power_up_chance: 0.0,
            enemy_chance: 0.0,
            power_pipe_chance: 0.0,
            ..Default::default()
        }
    }

    fn playing_session() -> GameSession {
        let mut session = GameSession::new(quiet_config(), MemoryStore::new(), 42);
        session.handle_input(InputKind::StartOrConfirm);
        session
    }

    /// Pipe whose gap surrounds the bird and whose right edge is just in
    /// front of it, so the next tick scores it.
    fn pipe_about_to_pass(session: &mut GameSession, is_power: bool) -> u32 {
        let id = session.ids.next_id();
        let mut pipe = Pipe::new(id, session.bird.y - 60.0, 2.0, is_power);
        pipe.x = session.bird.x - pipe.width + 1.0;
        session.pipes.push(pipe);
        id
    }

    #[test]
    fn test_start_transitions_to_playing_without_jumping() {
        let mut session = GameSession::new(quiet_config(), MemoryStore::new(), 1);
        assert_eq!(session.state, GameState::Start);
        session.handle_input(InputKind::Jump);
        assert_eq!(session.state, GameState::Playing);
        assert!(session.bird.velocity.abs() < f64::EPSILON);
        let events = session.tick(16);
        assert!(events.contains(&TickEvent::RunStarted));
    }

    #[test]
    fn test_inputs_outside_their_state_are_ignored() {
        let mut session = GameSession::new(quiet_config(), MemoryStore::new(), 1);
        session.handle_input(InputKind::Fire);
        session.handle_input(InputKind::TextChar('a'));
        session.handle_input(InputKind::Backspace);
        assert_eq!(session.state, GameState::Start);
        assert!(session.fireballs.is_empty());
        assert!(session.name_buffer.is_empty());
    }

    #[test]
    fn test_jump_and_fire_while_playing() {
        let mut session = playing_session();
        session.handle_input(InputKind::Jump);
        assert!((session.bird.velocity - BIRD_JUMP_IMPULSE).abs() < f64::EPSILON);
        session.handle_input(InputKind::Fire);
        assert_eq!(session.fireballs.len(), 1);
        let events = session.tick(16);
        assert!(events.contains(&TickEvent::Jumped));
        assert!(events.contains(&TickEvent::FireballLaunched));
    }

    #[test]
    fn test_passing_a_pipe_scores_once() {
        let mut session = playing_session();
        pipe_about_to_pass(&mut session, false);
        session.bird.velocity = BIRD_JUMP_IMPULSE / 2.0;
        let events = session.tick(16);
        assert_eq!(session.score, 1);
        assert!(events.contains(&TickEvent::PipePassed { bonus: 0 }));
        assert!(session.pipes[0].scored);
        session.tick(16);
        assert_eq!(session.score, 1);
    }

    #[test]
    fn test_power_pipe_bonus_and_slowdown() {
        let mut session = playing_session();
        pipe_about_to_pass(&mut session, true);
        let other = session.ids.next_id();
        session.pipes.push(Pipe::new(other, 200.0, 2.0, false));

        let events = session.tick(16);
        assert_eq!(session.score, 1 + session.config.power_pipe_bonus);
        assert!(events.contains(&TickEvent::PowerPipeActivated));
        assert!(session.slowdown.is_active());
        assert!(session.pipes[0].power_effect_active);
        assert!((session.pipes[0].speed - 1.0).abs() < 1e-9);
        assert!((session.pipes[1].speed - 1.0).abs() < 1e-9);

        let mut ended = false;
        for _ in 0..session.config.slowdown_ticks {
            session.bird.y = BIRD_START_Y;
            session.bird.velocity = 0.0;
            ended |= session.tick(0).contains(&TickEvent::SlowdownEnded);
        }
        assert_eq!(session.state, GameState::Playing);
        assert!(ended);
        assert!(!session.slowdown.is_active());
        assert!(session.pipes.iter().all(|p| !p.power_effect_active));
        assert!(session
            .pipes
            .iter()
            .all(|p| (p.speed - session.config.base_speed).abs() < 1e-9));
    }

    #[test]
    fn test_boundary_death_stops_pipes() {
        let mut session = playing_session();
        let id = session.ids.next_id();
        session.pipes.push(Pipe::new(id, 200.0, 2.0, false));
        session.bird.y = SCREEN_HEIGHT;
        let events = session.tick(16);
        assert_eq!(session.state, GameState::DeathSequence);
        assert!(events.contains(&TickEvent::Died(DeathCause::Boundary)));
        assert!(session.pipes.iter().all(|p| !p.is_moving));
    }

    #[test]
    fn test_pipe_death_targets_the_pipe() {
        let mut session = playing_session();
        let id = session.ids.next_id();
        let mut pipe = Pipe::new(id, 400.0, 2.0, false);
        pipe.x = session.bird.x + 2.0;
        session.pipes.push(pipe);
        session.tick(16);
        assert_eq!(session.state, GameState::DeathSequence);
        assert_eq!(session.bird.target_pipe, Some(id));
    }

    #[test]
    fn test_shield_suppresses_pipe_and_enemy_deaths() {
        let mut session = playing_session();
        session.bird.activate_shield(100);
        let pid = session.ids.next_id();
        let mut pipe = Pipe::new(pid, 400.0, 2.0, false);
        pipe.x = session.bird.x + 2.0;
        session.pipes.push(pipe);
        let eid = session.ids.next_id();
        session.enemies.push(Enemy {
            id: eid,
            rect: Rect::new(session.bird.x + 2.0, session.bird.y, ENEMY_SIZE, ENEMY_SIZE),
            speed: 2.0,
        });

        let events = session.tick(16);
        assert_eq!(session.state, GameState::Playing);
        assert!(events.contains(&TickEvent::ShieldBlocked));
        assert!(session.enemies.is_empty());
        assert_eq!(session.score, 0);
    }

    #[test]
    fn test_shielded_bird_is_kept_on_screen() {
        let mut session = playing_session();
        session.bird.activate_shield(100);
        session.bird.y = SCREEN_HEIGHT;
        session.tick(16);
        assert_eq!(session.state, GameState::Playing);
        assert!(session.bird.y + session.bird.height <= SCREEN_HEIGHT);
    }

    #[test]
    fn test_enemy_kills_unshielded_bird() {
        let mut session = playing_session();
        let eid = session.ids.next_id();
        session.enemies.push(Enemy {
            id: eid,
            rect: Rect::new(session.bird.x + 2.0, session.bird.y, ENEMY_SIZE, ENEMY_SIZE),
            speed: 2.0,
        });
        let events = session.tick(16);
        assert!(events.contains(&TickEvent::Died(DeathCause::Enemy)));
    }

    #[test]
    fn test_fireball_kill_awards_bonus() {
        let mut session = playing_session();
        session.handle_input(InputKind::Fire);
        let eid = session.ids.next_id();
        let fb = session.fireballs[0].rect;
        session.enemies.push(Enemy {
            id: eid,
            rect: Rect::new(fb.right() + 8.0, fb.y - 10.0, ENEMY_SIZE, ENEMY_SIZE),
            speed: 2.0,
        });
        let events = session.tick(16);
        assert!(events.contains(&TickEvent::EnemyKilled));
        assert_eq!(session.score, session.config.enemy_kill_bonus);
        assert!(session.enemies.is_empty());
        assert!(session.fireballs.is_empty());
    }

    #[test]
    fn test_power_up_kinds() {
        for kind in [PowerUpKind::Shield, PowerUpKind::SlowMotion, PowerUpKind::Points] {
            let mut session = playing_session();
            let id = session.ids.next_id();
            session.power_ups.push(PowerUp {
                id,
                kind,
                rect: Rect::new(session.bird.x, session.bird.y + 10.0, POWER_UP_SIZE, POWER_UP_SIZE),
                speed: 0.0,
            });
            let events = session.tick(16);
            assert!(events.contains(&TickEvent::PowerUpCollected(kind)));
            assert!(session.power_ups.is_empty());
            match kind {
                PowerUpKind::Shield => assert!(session.bird.shield_active),
                PowerUpKind::SlowMotion => assert!(session.slowdown.is_active()),
                PowerUpKind::Points => {
                    assert_eq!(session.score, session.config.points_power_up_bonus)
                }
            }
        }
    }

    #[test]
    fn test_spawn_timer_creates_pipes() {
        let mut session = playing_session();
        for _ in 0..100 {
            session.handle_input(InputKind::Jump);
            session.tick(16);
            session.bird.y = BIRD_START_Y;
            session.bird.velocity = 0.0;
        }
        assert!(!session.pipes.is_empty());
    }

    #[test]
    fn test_large_dt_is_capped() {
        let mut session = playing_session();
        session.tick(10_000);
        assert!(session.spawn_timer.elapsed_ms <= MAX_TICK_DT_MS);
        assert!(session.pipes.is_empty());
    }
}
