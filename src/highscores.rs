//! High score leaderboard and completion badges
//!
//! Persisted through a `Storage`, keeps the top 10 players, one entry each.

use std::cmp::Ordering;
use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::persistence::{Storage, StorageError, load_json, save_json};

/// Maximum number of high scores to keep
pub const MAX_HIGH_SCORES: usize = 10;

/// A single high score entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HighScoreEntry {
    pub player_name: String,
    pub score: u32,
    /// Level reached
    pub level: u32,
    /// Lives left when the run ended
    pub lives: u32,
}

impl HighScoreEntry {
    /// Leaderboard order: score, then level, then lives, all descending
    pub fn rank_cmp(&self, other: &Self) -> Ordering {
        other
            .score
            .cmp(&self.score)
            .then(other.level.cmp(&self.level))
            .then(other.lives.cmp(&self.lives))
    }

    pub fn beats(&self, other: &Self) -> bool {
        self.rank_cmp(other) == Ordering::Less
    }
}

/// High score leaderboard
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(transparent)]
pub struct HighScores {
    pub entries: Vec<HighScoreEntry>,
}

impl HighScores {
    const STORAGE_KEY: &'static str = "snakeHighscores";

    /// Create empty leaderboard
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Record a finished run. A player's entry is only replaced by a better
    /// one. Returns the player's rank (1-indexed) afterwards, or None if the
    /// entry fell off the board.
    pub fn record(&mut self, entry: HighScoreEntry) -> Option<usize> {
        let name = entry.player_name.clone();
        match self
            .entries
            .iter_mut()
            .find(|e| e.player_name == entry.player_name)
        {
            Some(existing) => {
                if entry.beats(existing) {
                    *existing = entry;
                }
            }
            None => self.entries.push(entry),
        }

        self.entries.sort_by(HighScoreEntry::rank_cmp);
        self.entries.truncate(MAX_HIGH_SCORES);
        self.rank_of(&name)
    }

    /// Rank of a player (1-indexed)
    pub fn rank_of(&self, player_name: &str) -> Option<usize> {
        self.entries
            .iter()
            .position(|e| e.player_name == player_name)
            .map(|i| i + 1)
    }

    /// Check if the leaderboard is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Get the top score (if any)
    pub fn top_score(&self) -> Option<u32> {
        self.entries.first().map(|e| e.score)
    }

    /// Load high scores; missing or corrupt data gives an empty board
    pub fn load<S: Storage + ?Sized>(storage: &S) -> Self {
        let mut scores: Self = load_json(storage, Self::STORAGE_KEY);
        scores.entries.sort_by(HighScoreEntry::rank_cmp);
        scores.entries.truncate(MAX_HIGH_SCORES);
        log::info!("Loaded {} high scores", scores.entries.len());
        scores
    }

    pub fn save<S: Storage + ?Sized>(&self, storage: &mut S) -> Result<(), StorageError> {
        save_json(storage, Self::STORAGE_KEY, self)?;
        log::info!("High scores saved ({} entries)", self.entries.len());
        Ok(())
    }
}

/// Completion badges per player
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(transparent)]
pub struct Badges {
    pub counts: BTreeMap<String, u32>,
}

impl Badges {
    const STORAGE_KEY: &'static str = "snakeBadges";

    /// Award one badge; returns the player's new total
    pub fn award(&mut self, player_name: &str) -> u32 {
        let count = self.counts.entry(player_name.to_string()).or_insert(0);
        *count += 1;
        log::info!("Badge awarded to {} (total {})", player_name, count);
        *count
    }

    pub fn count(&self, player_name: &str) -> u32 {
        self.counts.get(player_name).copied().unwrap_or(0)
    }

    pub fn load<S: Storage + ?Sized>(storage: &S) -> Self {
        load_json(storage, Self::STORAGE_KEY)
    }

    pub fn save<S: Storage + ?Sized>(&self, storage: &mut S) -> Result<(), StorageError> {
        save_json(storage, Self::STORAGE_KEY, self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::MemoryStorage;
    use proptest::prelude::*;

    fn entry(name: &str, score: u32, level: u32, lives: u32) -> HighScoreEntry {
        HighScoreEntry {
            player_name: name.to_string(),
            score,
            level,
            lives,
        }
    }

    #[test]
    fn test_ranking_tie_breaks() {
        let mut scores = HighScores::new();
        scores.record(entry("a", 10, 3, 1));
        scores.record(entry("b", 10, 3, 2));
        scores.record(entry("c", 10, 4, 0));
        scores.record(entry("d", 12, 1, 0));
        let names: Vec<_> = scores.entries.iter().map(|e| e.player_name.as_str()).collect();
        assert_eq!(names, ["d", "c", "b", "a"]);
        assert_eq!(scores.top_score(), Some(12));
    }

    #[test]
    fn test_one_entry_per_player_best_wins() {
        let mut scores = HighScores::new();
        scores.record(entry("agent", 20, 4, 2));
        assert_eq!(scores.record(entry("agent", 5, 2, 0)), Some(1));
        assert_eq!(scores.entries, vec![entry("agent", 20, 4, 2)]);

        scores.record(entry("agent", 20, 4, 3));
        assert_eq!(scores.entries, vec![entry("agent", 20, 4, 3)]);
    }

    #[test]
    fn test_keeps_top_ten() {
        let mut scores = HighScores::new();
        for i in 0..12 {
            scores.record(entry(&format!("p{i}"), i, 1, 0));
        }
        assert_eq!(scores.entries.len(), MAX_HIGH_SCORES);
        assert_eq!(scores.rank_of("p11"), Some(1));
        assert_eq!(scores.rank_of("p0"), None);
        assert_eq!(scores.record(entry("late", 0, 1, 0)), None);
    }

    #[test]
    fn test_json_layout() {
        let mut scores = HighScores::new();
        scores.record(entry("Agent", 7, 3, 2));
        let json = serde_json::to_string(&scores).unwrap();
        assert_eq!(json, r#"[{"playerName":"Agent","score":7,"level":3,"lives":2}]"#);

        let mut badges = Badges::default();
        badges.award("Agent");
        badges.award("Agent");
        assert_eq!(serde_json::to_string(&badges).unwrap(), r#"{"Agent":2}"#);
    }

    #[test]
    fn test_store_round_trip() {
        let mut storage = MemoryStorage::new();
        assert!(HighScores::load(&storage).is_empty());
        assert_eq!(Badges::load(&storage).count("x"), 0);

        let mut scores = HighScores::new();
        scores.record(entry("x", 3, 2, 1));
        scores.save(&mut storage).unwrap();
        let mut badges = Badges::default();
        badges.award("x");
        badges.save(&mut storage).unwrap();

        assert_eq!(HighScores::load(&storage), scores);
        assert_eq!(Badges::load(&storage).count("x"), 1);
    }

    #[test]
    fn test_reads_existing_browser_records() {
        let mut storage = MemoryStorage::new();
        storage
            .set_item(
                "snakeHighscores",
                r#"[{"playerName":"Cobra","score":42,"level":8,"lives":1}]"#,
            )
            .unwrap();
        storage.set_item("snakeBadges", r#"{"Cobra":3}"#).unwrap();

        assert_eq!(HighScores::load(&storage).entries, vec![entry("Cobra", 42, 8, 1)]);
        assert_eq!(Badges::load(&storage).count("Cobra"), 3);
    }

    fn arb_entry() -> impl Strategy<Value = HighScoreEntry> {
        ("[a-z]{1,6}", 0u32..100, 1u32..=10, 0u32..=4)
            .prop_map(|(name, score, level, lives)| entry(&name, score, level, lives))
    }

    proptest! {
        #[test]
        fn serialized_board_round_trips(entries in prop::collection::vec(arb_entry(), 0..20)) {
            let mut scores = HighScores::new();
            for e in entries {
                scores.record(e);
            }
            let json = serde_json::to_string(&scores).unwrap();
            let back: HighScores = serde_json::from_str(&json).unwrap();
            prop_assert_eq!(&back, &scores);
            prop_assert!(scores.entries.len() <= MAX_HIGH_SCORES);
            for pair in scores.entries.windows(2) {
                prop_assert!(pair[0].rank_cmp(&pair[1]) != Ordering::Greater);
                prop_assert_ne!(&pair[0].player_name, &pair[1].player_name);
            }
        }
    }
}
