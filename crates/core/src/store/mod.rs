//! Session-scoped key/value storage.
//!
//! The cache does not own its backing storage; it writes through a
//! [`SessionStore`] supplied by the embedding application. The store lives
//! as long as the caller's session, which bounds the cache lifetime.

use std::collections::HashMap;
use std::sync::Mutex;

/// Session-scoped string key/value store.
///
/// Implementations must be safe to share between threads; individual
/// `get`/`set` calls are atomic, but callers needing compound atomicity
/// (check-then-read, multi-key writes) must layer their own locking on top.
pub trait SessionStore: Send + Sync {
    /// Read the value stored under `key`, if any.
    fn get(&self, key: &str) -> Option<String>;

    /// Store `value` under `key`, replacing any previous value.
    fn set(&self, key: &str, value: String);
}

/// In-process [`SessionStore`] backed by a `HashMap`.
///
/// Suitable for single-process embedding and as the test double.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.lock().expect("store mutex poisoned").get(key).cloned()
    }

    fn set(&self, key: &str, value: String) {
        self.entries.lock().expect("store mutex poisoned").insert(key.to_string(), value);
    }
}
