//! Per-difficulty ranking tables
//!
//! Each difficulty keeps its own top-10 list, persisted as a JSON array under
//! `kintaro-slicer-ranking_<ordinal>`. Lists are sorted by descending score;
//! equal scores keep the order they were achieved in.

use serde::{Deserialize, Serialize};

use crate::difficulty::Difficulty;
use crate::error::StorageError;
use crate::persistence::{KeyValueStore, load_json, save_json};

/// Maximum number of entries per difficulty
pub const MAX_RANKING_ENTRIES: usize = 10;

/// Longest name accepted, in characters
pub const MAX_NAME_CHARS: usize = 10;

/// Used when the player leaves the name blank
pub const DEFAULT_PLAYER_NAME: &str = "Player";

pub const RANKING_KEY_PREFIX: &str = "kintaro-slicer-ranking_";

/// A single ranking entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankingEntry {
    pub name: String,
    pub score: u64,
    /// Display date, formatted by the platform
    pub date: String,
}

/// One difficulty's leaderboard
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Ranking {
    entries: Vec<RankingEntry>,
}

impl Ranking {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from possibly unsorted, oversized data
    pub fn from_entries(mut entries: Vec<RankingEntry>) -> Self {
        // Stable, so equal scores keep their stored order
        entries.sort_by(|a, b| b.score.cmp(&a.score));
        entries.truncate(MAX_RANKING_ENTRIES);
        Self { entries }
    }

    pub fn entries(&self) -> &[RankingEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Check if a score would enter the list
    pub fn qualifies(&self, score: u64) -> bool {
        if score == 0 {
            return false;
        }
        if self.entries.len() < MAX_RANKING_ENTRIES {
            return true;
        }
        self.entries.last().is_none_or(|e| score > e.score)
    }

    /// Rank a score would achieve (1-indexed, None if it doesn't qualify)
    pub fn potential_rank(&self, score: u64) -> Option<usize> {
        if !self.qualifies(score) {
            return None;
        }
        let pos = self.entries.iter().position(|e| score > e.score);
        Some(pos.unwrap_or(self.entries.len()) + 1)
    }

    /// Insert a qualifying entry, evicting the lowest past the cap
    /// Returns the rank achieved (1-indexed)
    pub fn insert(&mut self, entry: RankingEntry) -> Option<usize> {
        if !self.qualifies(entry.score) {
            return None;
        }

        // After any equal scores
        let pos = self
            .entries
            .iter()
            .position(|e| entry.score > e.score)
            .unwrap_or(self.entries.len());
        self.entries.insert(pos, entry);
        self.entries.truncate(MAX_RANKING_ENTRIES);

        Some(pos + 1)
    }

    pub fn top_score(&self) -> Option<u64> {
        self.entries.first().map(|e| e.score)
    }
}

/// Trim a typed name to at most `MAX_NAME_CHARS`, defaulting when blank
pub fn sanitize_name(raw: &str) -> String {
    let name: String = raw.trim().chars().take(MAX_NAME_CHARS).collect();
    let name = name.trim_end();
    if name.is_empty() {
        DEFAULT_PLAYER_NAME.to_string()
    } else {
        name.to_string()
    }
}

/// Rankings for every difficulty
#[derive(Debug, Clone, Default, Serialize)]
pub struct RankingBook {
    boards: [Ranking; 3],
}

impl RankingBook {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn storage_key(difficulty: Difficulty) -> String {
        format!("{RANKING_KEY_PREFIX}{}", difficulty.ordinal())
    }

    /// Load every board; unreadable boards start empty
    pub fn load(store: &impl KeyValueStore) -> Self {
        let mut book = Self::new();
        for difficulty in Difficulty::ALL {
            let key = Self::storage_key(difficulty);
            match load_json::<Vec<RankingEntry>>(store, &key) {
                Ok(Some(entries)) => {
                    let board = Ranking::from_entries(entries);
                    log::info!(
                        "Loaded {} ranking entries for {}",
                        board.len(),
                        difficulty.as_str()
                    );
                    book.boards[usize::from(difficulty.ordinal())] = board;
                }
                Ok(None) => {}
                Err(err) => log::warn!("Ranking for {} not loaded: {err}", difficulty.as_str()),
            }
        }
        book
    }

    pub fn get(&self, difficulty: Difficulty) -> &Ranking {
        &self.boards[usize::from(difficulty.ordinal())]
    }

    pub fn qualifies(&self, difficulty: Difficulty, score: u64) -> bool {
        self.get(difficulty).qualifies(score)
    }

    /// Add an entry and persist the whole board
    ///
    /// The in-memory board only changes once the write succeeded. Returns the
    /// rank achieved, or `None` if the score didn't qualify.
    pub fn record(
        &mut self,
        store: &mut impl KeyValueStore,
        difficulty: Difficulty,
        name: &str,
        score: u64,
        date: String,
    ) -> Result<Option<usize>, StorageError> {
        let mut board = self.get(difficulty).clone();
        let entry = RankingEntry {
            name: sanitize_name(name),
            score,
            date,
        };
        let Some(rank) = board.insert(entry) else {
            return Ok(None);
        };

        save_json(store, &Self::storage_key(difficulty), &board)?;
        log::info!(
            "Ranking saved: {} #{rank} with {score}",
            difficulty.as_str()
        );
        self.boards[usize::from(difficulty.ordinal())] = board;
        Ok(Some(rank))
    }
}
