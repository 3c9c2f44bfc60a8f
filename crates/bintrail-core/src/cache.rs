//! Cache port for rendered release projections.
//!
//! The engine invalidates entries for every record it creates or obsoletes,
//! strictly after the transaction committed. Frontends plug in whatever
//! store suits them.

use std::{collections::HashMap, sync::Mutex};

use serde_json::Value;

/// Trait for caching rendered projections, keyed by record ID.
pub trait RenderCache: Send + Sync {
    fn fetch(&self, id: i32) -> Option<Value>;
    fn store(&self, id: i32, rendered: Value);
    fn invalidate(&self, id: i32);
}

/// In-process cache backed by a mutexed map.
#[derive(Default)]
pub struct MemoryCache {
    entries: Mutex<HashMap<i32, Value>>,
}

impl MemoryCache {
    pub fn len(&self) -> usize {
        self.entries.lock().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl RenderCache for MemoryCache {
    fn fetch(&self, id: i32) -> Option<Value> {
        self.entries.lock().unwrap().get(&id).cloned()
    }

    fn store(&self, id: i32, rendered: Value) {
        self.entries.lock().unwrap().insert(id, rendered);
    }

    fn invalidate(&self, id: i32) {
        self.entries.lock().unwrap().remove(&id);
    }
}

/// No-op cache for one-shot runs.
pub struct NoopCache;

impl RenderCache for NoopCache {
    fn fetch(&self, _id: i32) -> Option<Value> {
        None
    }

    fn store(&self, _id: i32, _rendered: Value) {}

    fn invalidate(&self, _id: i32) {}
}
