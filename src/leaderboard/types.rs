use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    pub name: String,
    pub score: u32,
    pub date: DateTime<Utc>,
}

/// Ranked high-score table, sorted descending by score and capped at
/// `max_entries`. Equal scores keep insertion order.
#[derive(Debug, Clone, PartialEq)]
pub struct Leaderboard {
    pub(super) entries: Vec<LeaderboardEntry>,
    pub(super) max_entries: usize,
}

/// Tracks whether the current run has overtaken the board's pre-run leader.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BeatLeaderTracker {
    /// Top score captured when the run started. Zero means there was no leader.
    pub previous_top: u32,
    pub fired: bool,
    /// Ticks left on the "new leader" banner.
    pub banner_ticks: u32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NameError {
    Empty,
    TooLong { max: usize },
    InvalidChar(char),
}

impl fmt::Display for NameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NameError::Empty => write!(f, "name must not be empty"),
            NameError::TooLong { max } => write!(f, "name must be at most {} characters", max),
            NameError::InvalidChar(c) => write!(f, "name contains invalid character {:?}", c),
        }
    }
}

impl std::error::Error for NameError {}
