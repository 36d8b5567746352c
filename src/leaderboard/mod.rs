//! High-score table: ranking policy, beat-the-leader detection, name rules,
//! and the storage collaborators that load and persist it.

pub mod logic;
pub mod storage;
pub mod types;

pub use logic::validate_name;
pub use storage::{import_legacy, JsonFileStore, LeaderboardStore, MemoryStore};
pub use types::*;
