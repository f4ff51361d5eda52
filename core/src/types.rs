//! # WEAVE TYPE DEFINITIONS
//!
//! **CRITICAL**: Core identifiers and value handles shared by every registry
//! **MANDATE**: ALL bindings MUST be addressed through a `Key`

use std::any::Any;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

static KEY_COUNTER: AtomicU64 = AtomicU64::new(0);

/// **RESOLVED VALUE HANDLE**
///
/// Type-erased, shared value. Two handles refer to the same instance when
/// `Arc::ptr_eq` holds.
pub type Value = Arc<dyn Any + Send + Sync>;

/// Wraps a concrete value into a shared `Value` handle.
pub fn shared<T: Any + Send + Sync>(value: T) -> Value {
    Arc::new(value)
}

/// **SYMBOLIC KEY**
///
/// **PURPOSE**: Opaque identifier for a bindable abstraction.
/// **GUARANTEE**: Equality is identity. Two keys created with the same
/// description are distinct; clones of one key are equal.
#[derive(Clone)]
pub struct Key {
    id: u64,
    description: Arc<str>,
}

impl Key {
    /// **CONSTRUCTOR**
    pub fn new(description: impl Into<String>) -> Self {
        let id = KEY_COUNTER.fetch_add(1, Ordering::Relaxed);
        Self {
            id,
            description: Arc::from(description.into()),
        }
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn description(&self) -> &str {
        &self.description
    }
}

impl PartialEq for Key {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Key {}

impl Hash for Key {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Debug for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Key({}#{})", self.description, self.id)
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Symbol({})", self.description)
    }
}
