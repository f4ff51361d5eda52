use crate::binding::BindingEntry;
use crate::types::Key;
use std::collections::HashMap;

/// **CONTEXTUAL BINDING REGISTRY**
///
/// **PURPOSE**: Consumer key → dependency key → binding entry.
/// **GUARANTEE**: A consumer with no remaining dependents is dropped, so
/// `contains(consumer)` never reports an empty inner map.
#[derive(Debug, Default)]
pub struct ContextualBindingRegistry {
    bindings: HashMap<Key, HashMap<Key, BindingEntry>>,
}

impl ContextualBindingRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.bindings.clear();
    }

    pub fn contains(&self, consumer: &Key) -> bool {
        self.bindings.contains_key(consumer)
    }

    pub fn contains_dependent(&self, consumer: &Key, dependency: &Key) -> bool {
        self.bindings
            .get(consumer)
            .map_or(false, |dependents| dependents.contains_key(dependency))
    }

    pub fn get_dependent(&self, consumer: &Key, dependency: &Key) -> Option<&BindingEntry> {
        self.bindings
            .get(consumer)
            .and_then(|dependents| dependents.get(dependency))
    }

    pub fn set_dependent(&mut self, consumer: Key, dependency: Key, entry: BindingEntry) {
        self.bindings
            .entry(consumer)
            .or_default()
            .insert(dependency, entry);
    }

    pub fn unset_dependent(&mut self, consumer: &Key, dependency: &Key) -> Option<BindingEntry> {
        let dependents = self.bindings.get_mut(consumer)?;
        let removed = dependents.remove(dependency);
        if dependents.is_empty() {
            self.bindings.remove(consumer);
        }
        removed
    }

    /// Number of consumers with at least one contextual binding.
    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::binding::{Class, Factory};

    #[test]
    fn test_set_and_get_dependent() {
        let mut registry = ContextualBindingRegistry::new();
        let consumer = Key::new("consumer");
        let dependency = Key::new("dependency");
        let entry = BindingEntry::from(Factory::new(|_, _| Ok(5u8)));

        assert!(!registry.contains(&consumer));
        registry.set_dependent(consumer.clone(), dependency.clone(), entry.clone());

        assert!(registry.contains(&consumer));
        assert!(registry.contains_dependent(&consumer, &dependency));
        assert!(!registry.contains_dependent(&dependency, &consumer));
        assert_eq!(registry.get_dependent(&consumer, &dependency), Some(&entry));
        assert!(registry.get_dependent(&consumer, &Key::new("other")).is_none());
    }

    #[test]
    fn test_unset_dependent_compacts_consumer() {
        let mut registry = ContextualBindingRegistry::new();
        let consumer = Key::new("consumer");
        let first = Key::new("first");
        let second = Key::new("second");
        registry.set_dependent(consumer.clone(), first.clone(), Class::nullary("A", || ()).into());
        registry.set_dependent(consumer.clone(), second.clone(), Class::nullary("B", || ()).into());

        assert!(registry.unset_dependent(&consumer, &first).is_some());
        assert!(registry.contains(&consumer));

        assert!(registry.unset_dependent(&consumer, &second).is_some());
        assert!(!registry.contains(&consumer));
        assert!(registry.is_empty());

        assert!(registry.unset_dependent(&consumer, &second).is_none());
    }

    #[test]
    fn test_overwrite_dependent() {
        let mut registry = ContextualBindingRegistry::new();
        let consumer = Key::new("consumer");
        let dependency = Key::new("dependency");
        let replacement = BindingEntry::from(Class::nullary("B", || ()));
        registry.set_dependent(consumer.clone(), dependency.clone(), Class::nullary("A", || ()).into());
        registry.set_dependent(consumer.clone(), dependency.clone(), replacement.clone());

        assert_eq!(registry.get_dependent(&consumer, &dependency), Some(&replacement));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_clear() {
        let mut registry = ContextualBindingRegistry::new();
        registry.set_dependent(Key::new("c"), Key::new("d"), Class::nullary("A", || ()).into());
        registry.clear();
        assert!(registry.is_empty());
    }
}
