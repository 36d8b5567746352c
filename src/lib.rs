//! Skyflap - a terminal Flappy-Bird variant with bosses, shields and a
//! leaderboard.
//!
//! The game core ([`session::GameSession`]) is a deterministic, I/O-free
//! state machine; the terminal UI, the simulator and the optional
//! WebSocket server are thin drivers around it.

pub mod collision;
pub mod core;
pub mod encounter;
pub mod entities;
pub mod leaderboard;
pub mod scoring;
pub mod session;
pub mod simulator;
pub mod spawner;
pub mod ui;
pub mod utils;
pub mod web;

pub use core::GameConfig;
pub use session::{GameSession, GameSnapshot, GameState, InputKind, TickEvent, TickEvents};
