use crate::dependencies::Resolver;
use crate::types::Value;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

static OBSERVER_COUNTER: AtomicU64 = AtomicU64::new(0);

type HandlerFn = dyn Fn(&mut Resolver, &Value) + Send + Sync;

/// **REBIND OBSERVER**
///
/// Callback notified with the freshly resolved value of a rebound key. The
/// resolver handle lets a handler resolve further keys. Clones share identity.
#[derive(Clone)]
pub struct RebindEventObserver {
    id: u64,
    handler: Arc<HandlerFn>,
}

impl RebindEventObserver {
    pub fn new<F>(handler: F) -> Self
    where
        F: Fn(&mut Resolver, &Value) + Send + Sync + 'static,
    {
        Self {
            id: OBSERVER_COUNTER.fetch_add(1, Ordering::Relaxed),
            handler: Arc::new(handler),
        }
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn update(&self, resolver: &mut Resolver, value: &Value) {
        (self.handler)(resolver, value)
    }
}

impl PartialEq for RebindEventObserver {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for RebindEventObserver {}

impl fmt::Debug for RebindEventObserver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RebindEventObserver(#{})", self.id)
    }
}
