//! Core constants and tunable configuration.

pub mod config;
pub mod constants;

pub use config::GameConfig;
pub use constants::*;
