use crate::dependencies::Resolver;
use crate::errors::ContainerError;
use crate::events::observer::RebindEventObserver;
use crate::types::{Key, Value};
use std::collections::HashMap;

/// **REBIND EVENT SOURCE**
///
/// **PURPOSE**: Per-key observer lists notified when a key is rebound.
/// **GUARANTEE**: Observers are updated synchronously in registration order;
/// a key whose last observer is removed is dropped.
#[derive(Debug, Default)]
pub struct RebindEventSource {
    observers: HashMap<Key, Vec<RebindEventObserver>>,
}

impl RebindEventSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_observer(&mut self, key: Key, observer: RebindEventObserver) {
        self.observers.entry(key).or_default().push(observer);
    }

    pub fn clear_observers(&mut self) {
        self.observers.clear();
    }

    pub fn contains_observers(&self, key: &Key) -> bool {
        self.observers.contains_key(key)
    }

    pub fn remove_observer(&mut self, key: &Key, observer: &RebindEventObserver) {
        if let Some(observers) = self.observers.get_mut(key) {
            observers.retain(|candidate| candidate != observer);
            if observers.is_empty() {
                self.observers.remove(key);
            }
        }
    }

    pub fn remove_observers(&mut self, key: &Key) {
        self.observers.remove(key);
    }

    /// **TRIGGER EVENT**
    ///
    /// `value_fn` runs only when `key` has observers. Its error, if any, is
    /// returned before any observer is updated. Observers receive the same
    /// resolver handle afterwards.
    pub fn trigger_event<F>(
        &self,
        key: &Key,
        resolver: &mut Resolver,
        value_fn: F,
    ) -> Result<(), ContainerError>
    where
        F: FnOnce(&mut Resolver) -> Result<Value, ContainerError>,
    {
        let observers = match self.observers.get(key) {
            Some(observers) => observers,
            None => return Ok(()),
        };

        let value = value_fn(resolver)?;
        log::debug!("Notifying {} rebind observer(s) of {}", observers.len(), key);
        for observer in observers {
            observer.update(resolver, &value);
        }
        Ok(())
    }
}
