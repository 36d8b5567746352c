//! Plays whole games through [`GameSession`] with the autopilot at the
//! controls. Statistics are collected from tick events, never by peeking
//! at session internals.

use super::autopilot::Autopilot;
use super::config::SimConfig;
use super::report::{RunStats, SimReport};
use crate::core::constants::FRAME_MS;
use crate::leaderboard::MemoryStore;
use crate::session::{GameSession, GameState, TickEvent};

/// Run the full simulation and return a report.
pub fn run_simulation(config: &SimConfig) -> SimReport {
    let base_seed = config.seed.unwrap_or_else(rand::random);
    let mut runs = Vec::with_capacity(config.num_runs as usize);

    for run_idx in 0..config.num_runs {
        let stats = simulate_single_run(config, base_seed.wrapping_add(run_idx as u64));
        if config.verbosity >= 2 {
            println!(
                "Run {}/{} - score {}, ticks {}, bosses {}, death {:?}",
                run_idx + 1,
                config.num_runs,
                stats.score,
                stats.ticks,
                stats.bosses_defeated,
                stats.death_cause
            );
        }
        runs.push(stats);
    }

    SimReport::from_runs(runs)
}

/// Play one game from the start screen until the run is over or the tick
/// cap is hit.
pub fn simulate_single_run(config: &SimConfig, seed: u64) -> RunStats {
    let mut session = GameSession::new(config.game.clone(), MemoryStore::new(), seed);
    let pilot = Autopilot::new();
    let mut stats = RunStats {
        seed,
        ..Default::default()
    };

    while stats.ticks < config.max_ticks_per_run {
        if let Some(input) = pilot.decide(&session) {
            session.handle_input(input);
        }
        let events = session.tick(FRAME_MS);
        stats.ticks += 1;

        for event in events.iter() {
            match event {
                TickEvent::Jumped => stats.jumps += 1,
                TickEvent::FireballLaunched => stats.fireballs += 1,
                TickEvent::PowerPipeActivated => stats.power_pipes += 1,
                TickEvent::PowerUpCollected(_) => stats.power_ups += 1,
                TickEvent::EnemyKilled => stats.enemies_killed += 1,
                TickEvent::BossDefeated { .. } => stats.bosses_defeated += 1,
                TickEvent::Died(cause) => stats.death_cause = Some(*cause),
                _ => {}
            }
        }

        if session.state == GameState::Over {
            break;
        }
    }

    stats.score = session.score;
    stats.timed_out = session.state != GameState::Over;
    stats
}
