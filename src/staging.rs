//! Ingest staging: the mutable map that accumulates hash→category
//! associations before `train()` freezes the index.

use std::collections::{BTreeSet, HashMap};

/// Maps a normalized (lowercased) hex hash string to the set of category
/// ids it has been associated with across every `Update` call so far.
/// Consumed and cleared by `train()`.
#[derive(Debug, Default)]
pub struct Staging {
    entries: HashMap<String, BTreeSet<u32>>,
}

impl Staging {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record that `hash` (already normalized to lowercase) belongs to
    /// category `category_id`. A duplicate `(hash, category_id)` pair has
    /// no additional effect.
    pub fn insert(&mut self, hash: String, category_id: u32) {
        self.entries.entry(hash).or_default().insert(category_id);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Drain all staged entries, leaving the staging map empty. Iteration
    /// order is unspecified, matching spec §3's "record order is an
    /// implementation detail" invariant for the records built from it.
    pub fn drain(&mut self) -> Vec<(String, BTreeSet<u32>)> {
        self.entries.drain().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn repeated_insert_of_same_pair_is_idempotent() {
        let mut staging = Staging::new();
        staging.insert("abc".to_string(), 1);
        staging.insert("abc".to_string(), 1);
        let drained = staging.drain();
        assert_eq!(drained.len(), 1);
        assert_eq!(drained[0].1.len(), 1);
    }

    #[test]
    fn categories_across_calls_are_unioned() {
        let mut staging = Staging::new();
        staging.insert("abc".to_string(), 1);
        staging.insert("abc".to_string(), 2);
        let drained = staging.drain();
        assert_eq!(drained[0].1, [1, 2].into_iter().collect());
    }

    #[test]
    fn drain_empties_the_map() {
        let mut staging = Staging::new();
        staging.insert("abc".to_string(), 1);
        staging.drain();
        assert!(staging.is_empty());
    }
}
