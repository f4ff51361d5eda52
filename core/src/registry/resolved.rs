use crate::types::Key;
use std::collections::HashSet;

/// Keys that have completed at least one resolution.
#[derive(Debug, Default)]
pub struct ResolvedKeySet {
    keys: HashSet<Key>,
}

impl ResolvedKeySet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, key: Key) {
        self.keys.insert(key);
    }

    pub fn clear(&mut self) {
        self.keys.clear();
    }

    pub fn contains(&self, key: &Key) -> bool {
        self.keys.contains(key)
    }

    pub fn remove(&mut self, key: &Key) -> bool {
        self.keys.remove(key)
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}
