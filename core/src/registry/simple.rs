use crate::binding::BindingEntry;
use crate::types::Key;
use std::collections::HashMap;

/// **SIMPLE BINDING REGISTRY**
///
/// Key → (binding entry, resolve-once flag). Rebinding a key replaces both.
#[derive(Debug, Default)]
pub struct SimpleBindingRegistry {
    bindings: HashMap<Key, BindingEntry>,
    resolve_once_flags: HashMap<Key, bool>,
}

impl SimpleBindingRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.resolve_once_flags.clear();
        self.bindings.clear();
    }

    pub fn contains(&self, key: &Key) -> bool {
        self.bindings.contains_key(key)
    }

    pub fn get(&self, key: &Key) -> Option<&BindingEntry> {
        self.bindings.get(key)
    }

    pub fn set(&mut self, key: Key, entry: BindingEntry, resolve_once: bool) {
        self.resolve_once_flags.insert(key.clone(), resolve_once);
        self.bindings.insert(key, entry);
    }

    /// `None` when `key` is unbound, otherwise the stored flag.
    pub fn should_resolve_once(&self, key: &Key) -> Option<bool> {
        self.resolve_once_flags.get(key).copied()
    }

    pub fn unset(&mut self, key: &Key) -> Option<BindingEntry> {
        self.resolve_once_flags.remove(key);
        self.bindings.remove(key)
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}
