//! High score leaderboard system
//!
//! Persisted to LocalStorage, tracks the top 10 runs across all levels.

use std::cmp::Reverse;

use serde::{Deserialize, Serialize};

use crate::platform;
use crate::sim::Outcome;

/// Maximum number of high scores to keep
pub const MAX_HIGH_SCORES: usize = 10;

/// A single high score entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HighScoreEntry {
    pub score: u64,
    /// Level id (1000 for the daily level)
    pub level: u32,
    pub errors: u32,
    pub win: bool,
    /// Unix timestamp (ms) when achieved
    pub timestamp: f64,
}

impl HighScoreEntry {
    /// Higher score first, then cleaner prints, then wins over losses.
    /// Equal runs keep the older one in front.
    fn ranks_above(&self, other: &HighScoreEntry) -> bool {
        (self.score, Reverse(self.errors), self.win) > (other.score, Reverse(other.errors), other.win)
    }
}

/// High score leaderboard
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct HighScores {
    pub entries: Vec<HighScoreEntry>,
}

impl HighScores {
    /// LocalStorage key
    const STORAGE_KEY: &'static str = "pathprint_highscores";

    /// Create empty leaderboard
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Whether a finished run earns a place on the board
    pub fn qualifies(&self, entry: &HighScoreEntry) -> bool {
        if entry.score == 0 {
            return false;
        }
        self.entries.len() < MAX_HIGH_SCORES
            || self.entries.last().is_none_or(|last| entry.ranks_above(last))
    }

    /// Record a finished run.
    /// Returns the rank achieved (1-indexed) or None if it didn't qualify
    pub fn add_outcome(&mut self, level: u32, outcome: &Outcome, timestamp: f64) -> Option<usize> {
        let entry = HighScoreEntry {
            score: outcome.score,
            level,
            errors: outcome.errors,
            win: outcome.win,
            timestamp,
        };
        if !self.qualifies(&entry) {
            return None;
        }

        let i = self
            .entries
            .iter()
            .position(|e| entry.ranks_above(e))
            .unwrap_or(self.entries.len());
        self.entries.insert(i, entry);
        self.entries.truncate(MAX_HIGH_SCORES);

        Some(i + 1)
    }

    /// Load high scores from storage
    pub fn load() -> Self {
        if let Some(json) = platform::storage_get(Self::STORAGE_KEY) {
            match serde_json::from_str::<HighScores>(&json) {
                Ok(scores) => {
                    log::info!("Loaded {} high scores", scores.entries.len());
                    return scores;
                }
                Err(e) => log::warn!("Stored high scores unreadable: {}", e),
            }
        }

        log::info!("No high scores found, starting fresh");
        Self::new()
    }

    /// Save high scores to storage
    pub fn save(&self) {
        if let Ok(json) = serde_json::to_string(self) {
            if platform::storage_set(Self::STORAGE_KEY, &json) {
                log::info!("High scores saved ({} entries)", self.entries.len());
            }
        }
    }
}
