//! Simulation report generation.

use crate::session::DeathCause;
use serde::Serialize;

/// Outcome of one simulated game.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RunStats {
    pub seed: u64,
    pub score: u32,
    pub ticks: u64,
    pub timed_out: bool,
    pub death_cause: Option<DeathCause>,
    pub jumps: u32,
    pub fireballs: u32,
    pub enemies_killed: u32,
    pub power_ups: u32,
    pub power_pipes: u32,
    pub bosses_defeated: u32,
}

/// Aggregated results from multiple simulation runs.
#[derive(Debug, Clone, Serialize)]
pub struct SimReport {
    pub num_runs: u32,
    pub runs_timed_out: u32,

    pub avg_score: f64,
    pub median_score: u32,
    pub max_score: u32,
    pub avg_ticks: f64,
    pub avg_enemies_killed: f64,

    /// Runs that beat the first and the second boss.
    pub reached_first_boss: u32,
    pub reached_second_boss: u32,

    pub deaths_by_boundary: u32,
    pub deaths_by_pipe: u32,
    pub deaths_by_enemy: u32,

    /// Run counts per 10-point score bucket.
    pub score_buckets: Vec<u32>,

    pub runs: Vec<RunStats>,
}

fn mean(values: impl Iterator<Item = f64>, n: u32) -> f64 {
    values.sum::<f64>() / n.max(1) as f64
}

impl SimReport {
    pub fn from_runs(runs: Vec<RunStats>) -> Self {
        let num_runs = runs.len() as u32;
        let runs_timed_out = runs.iter().filter(|r| r.timed_out).count() as u32;

        let mut scores: Vec<u32> = runs.iter().map(|r| r.score).collect();
        scores.sort_unstable();
        let median_score = scores.get(scores.len() / 2).copied().unwrap_or(0);
        let max_score = scores.last().copied().unwrap_or(0);

        let mut score_buckets = vec![0; (max_score / 10) as usize + 1];
        for &s in &scores {
            score_buckets[(s / 10) as usize] += 1;
        }

        let deaths = |cause: DeathCause| {
            runs.iter()
                .filter(|r| r.death_cause == Some(cause))
                .count() as u32
        };

        Self {
            num_runs,
            runs_timed_out,
            avg_score: mean(runs.iter().map(|r| r.score as f64), num_runs),
            median_score,
            max_score,
            avg_ticks: mean(runs.iter().map(|r| r.ticks as f64), num_runs),
            avg_enemies_killed: mean(runs.iter().map(|r| r.enemies_killed as f64), num_runs),
            reached_first_boss: runs.iter().filter(|r| r.bosses_defeated >= 1).count() as u32,
            reached_second_boss: runs.iter().filter(|r| r.bosses_defeated >= 2).count() as u32,
            deaths_by_boundary: deaths(DeathCause::Boundary),
            deaths_by_pipe: deaths(DeathCause::Pipe),
            deaths_by_enemy: deaths(DeathCause::Enemy),
            score_buckets,
            runs,
        }
    }

    fn pct(&self, count: u32) -> f64 {
        count as f64 / self.num_runs.max(1) as f64 * 100.0
    }

    /// Generate a text report.
    pub fn to_text(&self) -> String {
        let mut report = String::new();

        report.push_str("═══════════════════════════════════════════════════════════════\n");
        report.push_str("                    SIMULATION REPORT\n");
        report.push_str("═══════════════════════════════════════════════════════════════\n\n");

        report.push_str(&format!(
            "Runs: {} total, {} timed out\n\n",
            self.num_runs, self.runs_timed_out
        ));

        report.push_str("── SCORES ───────────────────────────────────────────────────────\n");
        report.push_str(&format!("  Avg Score:          {:.1}\n", self.avg_score));
        report.push_str(&format!("  Median Score:       {}\n", self.median_score));
        report.push_str(&format!("  Max Score:          {}\n", self.max_score));
        report.push_str(&format!("  Avg Ticks:          {:.0}\n", self.avg_ticks));
        report.push_str(&format!(
            "  Avg Enemies Shot:   {:.2}\n\n",
            self.avg_enemies_killed
        ));

        report.push_str("── BOSSES ───────────────────────────────────────────────────────\n");
        report.push_str(&format!(
            "  Gatekeeper beaten:  {:>5.1}%\n",
            self.pct(self.reached_first_boss)
        ));
        report.push_str(&format!(
            "  Warden beaten:      {:>5.1}%\n\n",
            self.pct(self.reached_second_boss)
        ));

        report.push_str("── DEATHS ───────────────────────────────────────────────────────\n");
        for (label, count) in [
            ("Boundary", self.deaths_by_boundary),
            ("Pipe", self.deaths_by_pipe),
            ("Enemy", self.deaths_by_enemy),
        ] {
            report.push_str(&format!("  {:<9} {:>5.1}%\n", label, self.pct(count)));
        }
        report.push('\n');

        report.push_str("── SCORE DISTRIBUTION ───────────────────────────────────────────\n");
        for (i, &count) in self.score_buckets.iter().enumerate() {
            let pct = self.pct(count);
            let bar = "█".repeat((pct / 5.0) as usize);
            report.push_str(&format!(
                "  {:>3}-{:<3} {:>5.1}% {}\n",
                i * 10,
                i * 10 + 9,
                pct,
                bar
            ));
        }

        report
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_else(|_| "{}".to_string())
    }
}
