//! Leaderboard storage collaborators.
//!
//! Sessions read the board at the start of each run and write through
//! `record`, which adds one entry against the latest stored board. A
//! missing or corrupt board is recovered as an empty one; write failures
//! are reported to the caller.

use super::types::{Leaderboard, LeaderboardEntry};
use crate::core::LEADERBOARD_FILE;
use crate::utils::persistence;
use chrono::{DateTime, NaiveDateTime, Utc};
use serde::Deserialize;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

pub trait LeaderboardStore: Send + Sync {
    /// Stored entries, or an empty list when nothing usable is stored.
    fn load(&self) -> Vec<LeaderboardEntry>;
    fn persist(&self, entries: &[LeaderboardEntry]) -> io::Result<()>;

    /// Add `entry` to the currently stored board, cap it at `max_entries`
    /// and persist the result. Returns the refreshed board and the entry's
    /// rank if it made the cut.
    fn record(
        &self,
        entry: LeaderboardEntry,
        max_entries: usize,
    ) -> io::Result<(Leaderboard, Option<usize>)> {
        load_add_persist(self, entry, max_entries)
    }
}

fn load_add_persist<S: LeaderboardStore + ?Sized>(
    store: &S,
    entry: LeaderboardEntry,
    max_entries: usize,
) -> io::Result<(Leaderboard, Option<usize>)> {
    let mut board = Leaderboard::from_entries(store.load(), max_entries);
    let rank = board.add(&entry.name, entry.score, entry.date);
    store.persist(board.entries())?;
    Ok((board, rank))
}

impl<T: LeaderboardStore + ?Sized> LeaderboardStore for Arc<T> {
    fn load(&self) -> Vec<LeaderboardEntry> {
        (**self).load()
    }

    fn persist(&self, entries: &[LeaderboardEntry]) -> io::Result<()> {
        (**self).persist(entries)
    }

    fn record(
        &self,
        entry: LeaderboardEntry,
        max_entries: usize,
    ) -> io::Result<(Leaderboard, Option<usize>)> {
        (**self).record(entry, max_entries)
    }
}

/// Pretty-printed JSON file, by default `~/.skyflap/leaderboard.json`.
/// Clones share one write lock, so sessions holding clones of the same
/// store never interleave a read-modify-write.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
    write_lock: Arc<Mutex<()>>,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Arc::new(Mutex::new(())),
        }
    }

    pub fn default_location() -> io::Result<Self> {
        Ok(Self::new(persistence::data_path(LEADERBOARD_FILE)?))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl LeaderboardStore for JsonFileStore {
    fn load(&self) -> Vec<LeaderboardEntry> {
        persistence::load_json_at_or_default(&self.path)
    }

    fn persist(&self, entries: &[LeaderboardEntry]) -> io::Result<()> {
        persistence::save_json_at(&self.path, &entries)
    }

    fn record(
        &self,
        entry: LeaderboardEntry,
        max_entries: usize,
    ) -> io::Result<(Leaderboard, Option<usize>)> {
        let _guard = self
            .write_lock
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        load_add_persist(self, entry, max_entries)
    }
}

/// In-process store for tests, the simulator and server sessions.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<Vec<LeaderboardEntry>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_entries(entries: Vec<LeaderboardEntry>) -> Self {
        Self {
            entries: Mutex::new(entries),
        }
    }

    pub fn snapshot(&self) -> Vec<LeaderboardEntry> {
        self.entries
            .lock()
            .map(|e| e.clone())
            .unwrap_or_else(|poisoned| poisoned.into_inner().clone())
    }
}

impl LeaderboardStore for MemoryStore {
    fn load(&self) -> Vec<LeaderboardEntry> {
        self.snapshot()
    }

    fn persist(&self, entries: &[LeaderboardEntry]) -> io::Result<()> {
        let mut guard = self
            .entries
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        *guard = entries.to_vec();
        Ok(())
    }

    fn record(
        &self,
        entry: LeaderboardEntry,
        max_entries: usize,
    ) -> io::Result<(Leaderboard, Option<usize>)> {
        let mut guard = self
            .entries
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        let mut board = Leaderboard::from_entries(guard.clone(), max_entries);
        let rank = board.add(&entry.name, entry.score, entry.date);
        *guard = board.entries().to_vec();
        Ok((board, rank))
    }
}

/// Entry shape of older boards: the date is a local "YYYY-MM-DD HH:MM:SS"
/// string rather than RFC 3339.
#[derive(Debug, Deserialize)]
struct LegacyEntry {
    name: String,
    score: u32,
    date: String,
}

const LEGACY_DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

fn parse_legacy_date(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(date) = DateTime::parse_from_rfc3339(raw) {
        return Some(date.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(raw, LEGACY_DATE_FORMAT)
        .ok()
        .map(|naive| naive.and_utc())
}

/// Read an older JSON board. Entries with unreadable dates are skipped.
pub fn read_legacy(path: &Path) -> io::Result<Vec<LeaderboardEntry>> {
    let json = fs::read_to_string(path)?;
    let raw: Vec<LegacyEntry> =
        serde_json::from_str(&json).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
    Ok(raw
        .into_iter()
        .filter_map(|entry| match parse_legacy_date(&entry.date) {
            Some(date) => Some(LeaderboardEntry {
                name: entry.name,
                score: entry.score,
                date,
            }),
            None => {
                tracing::warn!("Skipping legacy entry {:?}: bad date {:?}", entry.name, entry.date);
                None
            }
        })
        .collect())
}

/// Seed `store` from an older board at `path`, but only when the store is
/// empty. The board is sorted and capped at `max_entries` before it is
/// written. Returns how many entries were imported.
pub fn import_legacy(
    store: &dyn LeaderboardStore,
    path: &Path,
    max_entries: usize,
) -> io::Result<usize> {
    if !store.load().is_empty() {
        return Ok(0);
    }
    let board = Leaderboard::from_entries(read_legacy(path)?, max_entries);
    store.persist(board.entries())?;
    tracing::info!("Imported {} leaderboard entries from {}", board.len(), path.display());
    Ok(board.len())
}
