//! Cumulative score tallies.

use crate::store::{KeyValueStore, SCORES_KEY, StorageError};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument, warn};
use ttt_core::{Mark, Outcome};

/// Wins per mark and draws across all games of a session.
///
/// Stored as `{"X":n,"O":n,"T":n}`. A missing key counts as zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Scores {
    #[serde(rename = "X")]
    x: u32,
    #[serde(rename = "O")]
    o: u32,
    #[serde(rename = "T")]
    draws: u32,
}

impl Scores {
    /// Creates a record with the given counts.
    pub fn new(x: u32, o: u32, draws: u32) -> Self {
        Self { x, o, draws }
    }

    /// Wins recorded for `mark`.
    pub fn wins(&self, mark: Mark) -> u32 {
        match mark {
            Mark::X => self.x,
            Mark::O => self.o,
        }
    }

    /// Draws recorded.
    pub fn draws(&self) -> u32 {
        self.draws
    }

    /// Total finished games, capped at `u32::MAX`.
    pub fn total(&self) -> u32 {
        self.x.saturating_add(self.o).saturating_add(self.draws)
    }

    /// Counts a finished game. Ongoing outcomes are ignored.
    ///
    /// Counters stop at `u32::MAX`.
    pub fn record(&mut self, outcome: &Outcome) {
        let counter = match outcome {
            Outcome::Win(Mark::X, _) => &mut self.x,
            Outcome::Win(Mark::O, _) => &mut self.o,
            Outcome::Draw => &mut self.draws,
            Outcome::Ongoing => return,
        };
        *counter = counter.saturating_add(1);
    }

    /// Loads scores from the store.
    ///
    /// An absent, unreadable, or malformed record loads as all zero.
    #[instrument(skip(store))]
    pub fn load(store: &dyn KeyValueStore) -> Self {
        let raw = match store.get(SCORES_KEY) {
            Ok(Some(raw)) => raw,
            Ok(None) => {
                debug!("No stored scores, starting from zero");
                return Self::default();
            }
            Err(e) => {
                warn!(error = %e, "Failed to read scores, starting from zero");
                return Self::default();
            }
        };

        serde_json::from_str(&raw).unwrap_or_else(|e| {
            warn!(error = %e, raw = %raw, "Stored scores are malformed, starting from zero");
            Self::default()
        })
    }

    /// Writes scores to the store.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if encoding or the write fails.
    #[instrument(skip(store))]
    pub fn save(&self, store: &dyn KeyValueStore) -> Result<(), StorageError> {
        let raw = serde_json::to_string(self)?;
        store.set(SCORES_KEY, &raw)?;
        debug!(scores = %raw, "Scores saved");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;

    #[test]
    fn test_record_counts_each_outcome_once() {
        let mut scores = Scores::default();
        let line = ttt_core::WIN_LINES[0];
        scores.record(&Outcome::Win(Mark::O, line));
        scores.record(&Outcome::Draw);
        scores.record(&Outcome::Ongoing);
        assert_eq!(scores, Scores::new(0, 1, 1));
        assert_eq!(scores.total(), 2);
    }

    #[test]
    fn test_counters_saturate() {
        let mut scores = Scores::new(u32::MAX, 1, 0);
        scores.record(&Outcome::Win(Mark::X, ttt_core::WIN_LINES[0]));
        assert_eq!(scores.wins(Mark::X), u32::MAX);
        assert_eq!(scores.total(), u32::MAX);
    }

    #[test]
    fn test_stored_format_uses_short_keys() {
        let store = MemoryStore::default();
        Scores::new(3, 1, 2).save(&store).unwrap();
        assert_eq!(
            store.get(SCORES_KEY).unwrap().as_deref(),
            Some(r#"{"X":3,"O":1,"T":2}"#)
        );
    }

    #[test]
    fn test_negative_counts_load_as_zero() {
        let store = MemoryStore::default();
        store.set(SCORES_KEY, r#"{"X":-1,"O":0,"T":0}"#).unwrap();
        assert_eq!(Scores::load(&store), Scores::default());
    }

    #[test]
    fn test_missing_key_counts_as_zero() {
        let store = MemoryStore::default();
        store.set(SCORES_KEY, r#"{"X":4}"#).unwrap();
        assert_eq!(Scores::load(&store), Scores::new(4, 0, 0));
    }
}
