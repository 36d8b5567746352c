//! Balance simulator CLI.
//!
//! Plays seeded games with the autopilot and prints aggregate statistics.
//!
//! Usage:
//!   cargo run --bin simulate -- [OPTIONS]
//!
//! Examples:
//!   cargo run --bin simulate                      # 200 random runs
//!   cargo run --bin simulate -- -n 1000 --seed 7  # Reproducible batch
//!   cargo run --bin simulate -- --json            # Also write a JSON report

use anyhow::Context;
use clap::Parser;
use skyflap::core::GameConfig;
use skyflap::simulator::{run_simulation, SimConfig};
use skyflap::utils::logging;
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "simulate", about = "Skyflap balance simulator")]
struct Args {
    /// Number of games to play
    #[arg(short = 'n', long = "runs", default_value_t = 200)]
    runs: u32,

    /// Base seed for reproducible batches
    #[arg(short, long)]
    seed: Option<u64>,

    /// Tick cap per game
    #[arg(short = 't', long = "ticks", default_value_t = 36_000)]
    max_ticks: u64,

    /// Game config JSON to simulate with (defaults to built-in tuning)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Print one line per run
    #[arg(short, long)]
    verbose: bool,

    /// Write the report as JSON next to the text output
    #[arg(long)]
    json: bool,
}

fn main() -> anyhow::Result<()> {
    logging::init_stderr();
    let args = Args::parse();

    let game = match &args.config {
        Some(path) => GameConfig::load_from(path),
        None => GameConfig::default(),
    };
    let config = SimConfig {
        num_runs: args.runs,
        seed: args.seed,
        max_ticks_per_run: args.max_ticks,
        game,
        verbosity: if args.verbose { 2 } else { 1 },
    };

    println!("╔═══════════════════════════════════════════════════════════════╗");
    println!("║              SKYFLAP BALANCE SIMULATOR                        ║");
    println!("╚═══════════════════════════════════════════════════════════════╝");
    println!();
    println!("Configuration:");
    println!("  Runs:           {}", config.num_runs);
    println!("  Max Ticks:      {}", config.max_ticks_per_run);
    println!("  Enemy Chance:   {:.2}", config.game.enemy_chance);
    println!("  Power-up:       {:.2}", config.game.power_up_chance);
    if let Some(seed) = config.seed {
        println!("  Seed:           {}", seed);
    }
    println!();
    println!("Running simulation...");
    println!();

    let report = run_simulation(&config);
    println!("{}", report.to_text());

    if args.json {
        let filename = format!(
            "sim_report_{}.json",
            chrono::Utc::now().format("%Y%m%d_%H%M%S")
        );
        std::fs::write(&filename, report.to_json())
            .with_context(|| format!("writing {}", filename))?;
        println!("JSON report saved to: {}", filename);
    }
    Ok(())
}
