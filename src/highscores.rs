//! Best / last score bookkeeping
//!
//! Two string-encoded integers in storage. The best score is read once at
//! startup; both are written whenever they change. Storage trouble is never
//! fatal.

use crate::consts::{BEST_KEY, SCORE_KEY};
use crate::persistence::{KeyValueStore, read_u64, write_u64};

/// Scores as last written to storage
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HighScores {
    pub best: u64,
    /// Score written this session; `None` until the first write
    pub last: Option<u64>,
}

impl HighScores {
    /// Load the best score (missing or unparsable means 0)
    pub fn load(store: &impl KeyValueStore) -> Self {
        let best = read_u64(store, BEST_KEY).unwrap_or(0);
        log::info!("Best score: {}", best);
        Self { best, last: None }
    }

    /// Persist `score` if it differs from what was last written.
    /// The first call always writes, replacing any previous session's value.
    pub fn save_score(&mut self, store: &mut impl KeyValueStore, score: u64) {
        if self.last != Some(score) {
            self.last = Some(score);
            write_u64(store, SCORE_KEY, score);
        }
    }

    /// Persist `best` if it changed. Returns true on a new best.
    pub fn save_best(&mut self, store: &mut impl KeyValueStore, best: u64) -> bool {
        if best == self.best {
            return false;
        }
        self.best = best;
        write_u64(store, BEST_KEY, best);
        log::info!("New best score: {}", best);
        true
    }
}

/// HUD formatting: zero padded to five digits
pub fn format_score(score: u64) -> String {
    format!("{:05}", score)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::MemoryStore;

    #[test]
    fn test_load_defaults_to_zero() {
        let store = MemoryStore::new();
        assert_eq!(HighScores::load(&store).best, 0);

        let mut bad = MemoryStore::new();
        bad.set(BEST_KEY, "NaN").unwrap();
        assert_eq!(HighScores::load(&bad).best, 0);

        assert_eq!(HighScores::load(&MemoryStore::unavailable()).best, 0);
    }

    #[test]
    fn test_round_trip_through_store() {
        let mut store = MemoryStore::new();
        let mut scores = HighScores::load(&store);
        scores.save_score(&mut store, 12);
        assert!(scores.save_best(&mut store, 12));
        assert!(!scores.save_best(&mut store, 12));

        assert_eq!(store.get(SCORE_KEY).unwrap().as_deref(), Some("12"));
        assert_eq!(HighScores::load(&store).best, 12);
    }

    #[test]
    fn test_first_save_replaces_previous_session_score() {
        let mut store = MemoryStore::new();
        store.set(SCORE_KEY, "7").unwrap();
        let mut scores = HighScores::load(&store);
        scores.save_score(&mut store, 0);
        assert_eq!(store.get(SCORE_KEY).unwrap().as_deref(), Some("0"));
        assert_eq!(scores.last, Some(0));
    }

    #[test]
    fn test_format_score() {
        assert_eq!(format_score(42), "00042");
        assert_eq!(format_score(123456), "123456");
    }
}
