use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::hash::Hash;

use crate::Score;

/// Best score seen so far for each search key. Lives for a single search.
#[derive(Debug)]
pub struct DominanceTable<K> {
    best_for: HashMap<K, Score>,
    best: Score,
}

impl<K> Default for DominanceTable<K> {
    fn default() -> Self {
        DominanceTable { best_for: HashMap::new(), best: 0 }
    }
}

impl<K: Eq + Hash> DominanceTable<K> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records `score` for `key` if it beats what's there, or if `key` hasn't been seen yet.
    /// Returns false when the state is dominated and should be dropped.
    pub fn improve(&mut self, key: K, score: Score) -> bool {
        match self.best_for.entry(key) {
            Entry::Occupied(mut e) => {
                if score <= *e.get() {
                    return false;
                }
                e.insert(score);
            },
            Entry::Vacant(e) => {
                e.insert(score);
            },
        }
        self.best = self.best.max(score);
        true
    }

    pub fn get(&self, key: &K) -> Option<Score> {
        self.best_for.get(key).copied()
    }

    /// The highest score recorded under any key, or 0 if nothing has been recorded.
    pub fn best(&self) -> Score {
        self.best
    }

    pub fn len(&self) -> usize {
        self.best_for.len()
    }

    pub fn is_empty(&self) -> bool {
        self.best_for.is_empty()
    }
}
