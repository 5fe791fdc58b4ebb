//! Transposition table for solved states

use std::collections::BTreeMap;

use super::path::Path;
use super::state::{GameState, StateKey};

/// Solved states keyed by `StateKey`. Entries are never evicted.
#[derive(Clone, Debug, Default)]
pub struct VisitedStateCache {
    entries: BTreeMap<StateKey, Path>,
    hits: u64,
}

impl VisitedStateCache {
    pub fn new() -> Self {
        VisitedStateCache::default()
    }

    /// Store the solved path of a state, overwriting any earlier entry
    pub fn put(&mut self, state: &GameState, path: Path) {
        self.put_key(state.key(), path);
    }

    /// Get the solved path of a state, or an invalid path if it was never stored.
    ///
    /// Every successful lookup counts as a hit.
    pub fn get(&mut self, state: &GameState) -> Path {
        self.get_key(&state.key())
    }

    pub(crate) fn put_key(&mut self, key: StateKey, path: Path) {
        self.entries.insert(key, path);
    }

    pub(crate) fn get_key(&mut self, key: &StateKey) -> Path {
        match self.entries.get(key) {
            Some(path) => {
                self.hits += 1;
                path.clone()
            }
            None => Path::invalid(),
        }
    }

    /// Number of successful lookups so far
    #[inline]
    pub fn hits(&self) -> u64 {
        self.hits
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Drop all entries and reset the hit counter
    pub fn clear(&mut self) {
        self.entries.clear();
        self.hits = 0;
    }
}
