//! Ranking rules: high-score qualification, insertion, and leader tracking.

use super::types::*;
use crate::core::constants::{BEAT_LEADER_BANNER_TICKS, MAX_NAME_LEN};
use chrono::{DateTime, Utc};

impl Leaderboard {
    pub fn new(max_entries: usize) -> Self {
        Self {
            entries: Vec::new(),
            max_entries: max_entries.max(1),
        }
    }

    /// Build a board from stored entries, restoring the sort and cap.
    pub fn from_entries(mut entries: Vec<LeaderboardEntry>, max_entries: usize) -> Self {
        let max_entries = max_entries.max(1);
        entries.sort_by(|a, b| b.score.cmp(&a.score));
        entries.truncate(max_entries);
        Self {
            entries,
            max_entries,
        }
    }

    pub fn entries(&self) -> &[LeaderboardEntry] {
        &self.entries
    }

    pub fn max_entries(&self) -> usize {
        self.max_entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.entries.len() >= self.max_entries
    }

    /// Highest score on the board, 0 when empty.
    pub fn top_score(&self) -> u32 {
        self.entries.first().map_or(0, |e| e.score)
    }

    pub fn top_name(&self) -> Option<&str> {
        self.entries.first().map(|e| e.name.as_str())
    }

    pub fn lowest_score(&self) -> Option<u32> {
        self.entries.last().map(|e| e.score)
    }

    /// True when the board has room, or `score` beats the lowest entry.
    pub fn is_high_score(&self, score: u32) -> bool {
        if !self.is_full() {
            return true;
        }
        self.lowest_score().map_or(true, |lowest| score > lowest)
    }

    /// Insert, re-sort descending, truncate. Returns the entry's rank
    /// (0-based) if it survived the cut.
    pub fn add(&mut self, name: &str, score: u32, date: DateTime<Utc>) -> Option<usize> {
        // Behind every existing entry with an equal or higher score.
        let rank = self.entries.partition_point(|e| e.score >= score);
        self.entries.insert(
            rank,
            LeaderboardEntry {
                name: name.to_string(),
                score,
                date,
            },
        );
        self.entries.truncate(self.max_entries);
        (rank < self.max_entries).then_some(rank)
    }
}

impl BeatLeaderTracker {
    /// Arm the tracker for a new run against the board's current top score.
    pub fn begin_run(&mut self, previous_top: u32) {
        self.previous_top = previous_top;
        self.fired = false;
        self.banner_ticks = 0;
    }

    /// Returns true exactly once per run: the first time `score` exceeds a
    /// nonzero pre-run top score. Starts the banner when it fires.
    pub fn check(&mut self, score: u32) -> bool {
        if self.fired || self.previous_top == 0 || score <= self.previous_top {
            return false;
        }
        self.fired = true;
        self.banner_ticks = BEAT_LEADER_BANNER_TICKS;
        true
    }

    pub fn tick_banner(&mut self) {
        self.banner_ticks = self.banner_ticks.saturating_sub(1);
    }

    pub fn banner_visible(&self) -> bool {
        self.banner_ticks > 0
    }
}

/// Check a player name: 1 to 10 ASCII letters or digits. Surrounding
/// whitespace is trimmed first.
pub fn validate_name(raw: &str) -> Result<String, NameError> {
    let name = raw.trim();
    if name.is_empty() {
        return Err(NameError::Empty);
    }
    if let Some(c) = name.chars().find(|c| !c.is_ascii_alphanumeric()) {
        return Err(NameError::InvalidChar(c));
    }
    if name.chars().count() > MAX_NAME_LEN {
        return Err(NameError::TooLong { max: MAX_NAME_LEN });
    }
    Ok(name.to_string())
}
