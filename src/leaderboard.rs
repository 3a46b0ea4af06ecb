//! Top-10 leaderboard: ranking, truncation and the "new record" signal.

use crate::core::constants::LEADERBOARD_CAPACITY;
use crate::simulation::Difficulty;
use crate::utils::persistence::{load_leaderboard_or_default, Store};
use chrono::{DateTime, Local};
use log::{info, warn};
use serde::{Deserialize, Serialize};

/// One finished run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    pub score: u32,
    pub difficulty: Difficulty,
    #[serde(rename = "obstacle")]
    pub obstacle_mode: bool,
    /// Human-readable local date, `YYYY-MM-DD`.
    pub date: String,
    /// Creation time in epoch milliseconds. Identifies the entry.
    pub timestamp: i64,
}

impl LeaderboardEntry {
    pub fn new(score: u32, difficulty: Difficulty, obstacle_mode: bool, at: DateTime<Local>) -> Self {
        Self {
            score,
            difficulty,
            obstacle_mode,
            date: at.format("%Y-%m-%d").to_string(),
            timestamp: at.timestamp_millis(),
        }
    }
}

/// Ranked runs, best first, at most `LEADERBOARD_CAPACITY` long.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Leaderboard {
    entries: Vec<LeaderboardEntry>,
}

impl Leaderboard {
    /// Rank an arbitrary list of entries, keeping stored order among ties.
    pub fn from_entries(mut entries: Vec<LeaderboardEntry>) -> Self {
        rank(&mut entries);
        Self { entries }
    }

    /// Load from storage. Unreadable storage yields an empty board.
    pub fn load(store: &dyn Store) -> Self {
        Self::from_entries(load_leaderboard_or_default(store))
    }

    /// Insert a finished run, re-rank, truncate and persist.
    ///
    /// Returns true when the new entry ends up at rank 0. Ties keep earlier
    /// entries ahead, so matching the current best is not a new record.
    pub fn record(&mut self, entry: LeaderboardEntry, store: &mut dyn Store) -> bool {
        let timestamp = entry.timestamp;
        let score = entry.score;
        self.entries.push(entry);
        rank(&mut self.entries);

        let new_record = self
            .entries
            .first()
            .is_some_and(|best| best.timestamp == timestamp);

        if let Err(err) = store.save_leaderboard(&self.entries) {
            warn!("leaderboard not saved: {err}");
        }
        if new_record {
            info!("new top score: {score}");
        }
        new_record
    }

    /// Current standings, best first.
    pub fn list(&self) -> &[LeaderboardEntry] {
        &self.entries
    }

    pub fn best_score(&self) -> Option<u32> {
        self.entries.first().map(|e| e.score)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Drop every entry and persist the empty board.
    pub fn clear(&mut self, store: &mut dyn Store) {
        self.entries.clear();
        if let Err(err) = store.save_leaderboard(&self.entries) {
            warn!("leaderboard not cleared: {err}");
        }
    }
}

/// Stable sort by score descending, then keep the top entries.
fn rank(entries: &mut Vec<LeaderboardEntry>) {
    entries.sort_by(|a, b| b.score.cmp(&a.score));
    entries.truncate(LEADERBOARD_CAPACITY);
}
