//! Score-triggered boss encounters.
//!
//! A small phase machine (entry slide, timed attack exchanges, victory pose)
//! that interrupts normal play. The player is guaranteed to win; the boss's
//! misses only decide how battered the avatar looks.

pub mod logic;
pub mod types;

pub use logic::*;
pub use types::*;
