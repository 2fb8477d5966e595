//! High score leaderboard system
//!
//! Tracks top 10 scores. Persisted as plain text: one integer per line,
//! highest first, no header.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Maximum number of high scores to keep
pub const MAX_HIGH_SCORES: usize = 10;

/// Default leaderboard file name
pub const HIGH_SCORE_FILE: &str = "highscores.txt";

/// High score leaderboard (sorted descending)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct HighScores {
    entries: Vec<u64>,
}

impl HighScores {
    /// Create empty leaderboard
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Build a leaderboard from any list of scores (sorted + truncated)
    pub fn from_scores(scores: impl IntoIterator<Item = u64>) -> Self {
        let mut entries: Vec<u64> = scores.into_iter().collect();
        entries.sort_unstable_by(|a, b| b.cmp(a));
        entries.truncate(MAX_HIGH_SCORES);
        Self { entries }
    }

    /// Scores, highest first
    pub fn entries(&self) -> &[u64] {
        &self.entries
    }

    /// Check if a score would make the leaderboard
    pub fn qualifies(&self, score: u64) -> bool {
        if self.entries.len() < MAX_HIGH_SCORES {
            return true;
        }
        self.entries.last().map(|&e| score > e).unwrap_or(true)
    }

    /// Record a finished match.
    /// Returns the rank achieved (1-indexed) or None if it fell off the board
    pub fn record(&mut self, score: u64) -> Option<usize> {
        if !self.qualifies(score) {
            return None;
        }

        // Insert after equal scores so earlier entries keep their rank
        let pos = self
            .entries
            .iter()
            .position(|&e| score > e)
            .unwrap_or(self.entries.len());
        self.entries.insert(pos, score);
        self.entries.truncate(MAX_HIGH_SCORES);

        Some(pos + 1)
    }

    /// Check if the leaderboard is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Get the top score (if any)
    pub fn top_score(&self) -> Option<u64> {
        self.entries.first().copied()
    }

    /// Encode as newline-delimited text
    pub fn encode(&self) -> String {
        let mut out = String::with_capacity(self.entries.len() * 8);
        for score in &self.entries {
            out.push_str(&score.to_string());
            out.push('\n');
        }
        out
    }

    /// Decode newline-delimited text. Lines that are not integers are skipped.
    pub fn decode(text: &str) -> Self {
        let scores = text.split_whitespace().filter_map(|tok| match tok.parse::<u64>() {
            Ok(score) => Some(score),
            Err(_) => {
                log::warn!("Skipping unreadable high score entry {tok:?}");
                None
            }
        });
        Self::from_scores(scores)
    }

    /// Load high scores from a file. A missing file is an empty leaderboard.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        match std::fs::read_to_string(path) {
            Ok(text) => {
                let scores = Self::decode(&text);
                log::info!("Loaded {} high scores", scores.entries.len());
                Ok(scores)
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                log::info!("No high scores found, starting fresh");
                Ok(Self::new())
            }
            Err(e) => Err(Error::io(path, e)),
        }
    }

    /// Save high scores to a file (truncating it)
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        std::fs::write(path, self.encode()).map_err(|e| Error::io(path, e))?;
        log::info!("High scores saved ({} entries)", self.entries.len());
        Ok(())
    }
}
