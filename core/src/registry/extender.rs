use crate::dependencies::Resolver;
use crate::errors::ContainerError;
use crate::types::{Key, Value};
use std::collections::HashMap;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

static EXTENDER_COUNTER: AtomicU64 = AtomicU64::new(0);

type ExtendFn = dyn Fn(&mut Resolver, Value) -> Result<Value, ContainerError> + Send + Sync;

/// **EXTENDER**
///
/// **PURPOSE**: Post-construction transform applied to every fresh build of a key.
/// The resolver handle lets a transform resolve further keys.
/// **GUARANTEE**: Clones share identity, which is what `remove` matches on.
#[derive(Clone)]
pub struct Extender {
    id: u64,
    function: Arc<ExtendFn>,
}

impl Extender {
    pub fn new<F>(function: F) -> Self
    where
        F: Fn(&mut Resolver, Value) -> Result<Value, ContainerError> + Send + Sync + 'static,
    {
        Self {
            id: EXTENDER_COUNTER.fetch_add(1, Ordering::Relaxed),
            function: Arc::new(function),
        }
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn apply(&self, resolver: &mut Resolver, value: Value) -> Result<Value, ContainerError> {
        (self.function)(resolver, value)
    }
}

impl PartialEq for Extender {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Extender {}

impl fmt::Debug for Extender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Extender(#{})", self.id)
    }
}

/// **EXTENDER REGISTRY**
///
/// Key → FIFO chain of extenders. Chains only grow until an extender is
/// removed explicitly; an emptied chain is dropped.
#[derive(Debug, Default)]
pub struct ExtenderRegistry {
    chains: HashMap<Key, Vec<Extender>>,
}

impl ExtenderRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, key: Key, extender: Extender) {
        self.chains.entry(key).or_default().push(extender);
    }

    pub fn clear(&mut self) {
        self.chains.clear();
    }

    pub fn contains(&self, key: &Key) -> bool {
        self.chains.contains_key(key)
    }

    /// Extenders for `key` in registration order.
    pub fn get_functions(&self, key: &Key) -> Option<&[Extender]> {
        self.chains.get(key).map(Vec::as_slice)
    }

    /// Removes the first extender sharing identity with `extender`.
    pub fn remove(&mut self, key: &Key, extender: &Extender) -> bool {
        let chain = match self.chains.get_mut(key) {
            Some(chain) => chain,
            None => return false,
        };

        let removed = match chain.iter().position(|candidate| candidate == extender) {
            Some(index) => {
                chain.remove(index);
                true
            }
            None => false,
        };

        if chain.is_empty() {
            self.chains.remove(key);
        }
        removed
    }

    pub fn remove_all(&mut self, key: &Key) -> bool {
        self.chains.remove(key).is_some()
    }

    pub fn len(&self) -> usize {
        self.chains.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chains.is_empty()
    }
}
