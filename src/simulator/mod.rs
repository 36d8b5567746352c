//! Headless balance simulator.
//!
//! Plays many seeded games with a scripted pilot to answer questions like:
//! - How often does an average player reach each boss?
//! - What kills players most (walls, pipes or enemies)?
//! - How do spawn chances and the speed curve move the score distribution?
//!
//! Every run goes through [`GameSession`](crate::session::GameSession), so
//! the numbers reflect the real game rules.

mod autopilot;
mod config;
mod report;
mod runner;

pub use autopilot::Autopilot;
pub use config::SimConfig;
pub use report::{RunStats, SimReport};
pub use runner::{run_simulation, simulate_single_run};
