//! Simulation configuration.

use crate::core::GameConfig;

/// Configuration for a simulation run.
#[derive(Debug, Clone)]
pub struct SimConfig {
    /// Number of simulated games
    pub num_runs: u32,

    /// Base seed; run `i` uses `seed + i` (None = random)
    pub seed: Option<u64>,

    /// Ticks per game before it is abandoned as timed out
    pub max_ticks_per_run: u64,

    /// Game tuning the runs are played with
    pub game: GameConfig,

    /// Log verbosity (0 = silent, 1 = summary, 2 = per run)
    pub verbosity: u8,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            num_runs: 200,
            seed: None,
            max_ticks_per_run: 60 * 60 * 10,
            game: GameConfig::default(),
            verbosity: 1,
        }
    }
}

impl SimConfig {
    /// Small deterministic batch, handy for tests and quick balance checks.
    pub fn quick(seed: u64) -> Self {
        Self {
            num_runs: 10,
            seed: Some(seed),
            max_ticks_per_run: 60 * 60 * 2,
            verbosity: 0,
            ..Default::default()
        }
    }
}
