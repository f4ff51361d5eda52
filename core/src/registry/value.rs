use crate::types::{Key, Value};
use std::collections::HashMap;

/// **VALUE BINDING REGISTRY**
///
/// Holds explicitly bound values as well as the materialized results of
/// resolve-once bindings.
#[derive(Default)]
pub struct ValueBindingRegistry {
    bindings: HashMap<Key, Value>,
}

impl ValueBindingRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.bindings.clear();
    }

    pub fn contains(&self, key: &Key) -> bool {
        self.bindings.contains_key(key)
    }

    pub fn get(&self, key: &Key) -> Option<&Value> {
        self.bindings.get(key)
    }

    pub fn set(&mut self, key: Key, value: Value) -> Option<Value> {
        self.bindings.insert(key, value)
    }

    pub fn unset(&mut self, key: &Key) -> Option<Value> {
        self.bindings.remove(key)
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}
