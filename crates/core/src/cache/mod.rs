//! Session-backed, TTL-gated cache of fetched documents.
//!
//! One [`PageCache`] instance covers one fetch URL. Entries live in the
//! injected [`SessionStore`], so the cache is scoped to the caller's session
//! and evaporates with it. Content and fetch timestamp are written together;
//! readers never observe one without the other.

pub mod key;

use std::sync::{Arc, Mutex};
use std::time::Duration;

use chrono::{DateTime, Utc};

use crate::store::SessionStore;

/// TTL-gated cache entry handle for a single fetch URL.
pub struct PageCache {
    store: Arc<dyn SessionStore>,
    duration: Duration,
    content_key: String,
    fetched_at_key: String,
    /// Every compound sequence (check-then-read, content+timestamp write)
    /// must hold this lock.
    lock: Mutex<()>,
}

impl PageCache {
    /// Create a cache handle for `url`, valid for `duration` after a write.
    pub fn new(store: Arc<dyn SessionStore>, url: &str, duration: Duration) -> Self {
        Self {
            store,
            duration,
            content_key: key::content_key(url),
            fetched_at_key: key::fetched_at_key(url),
            lock: Mutex::new(()),
        }
    }

    /// Whether any cached content exists for the URL, regardless of age.
    pub fn is_cached_version_available(&self) -> bool {
        let _guard = self.lock.lock().expect("cache mutex poisoned");
        self.content_unlocked().is_some()
    }

    /// Whether cached content exists and is younger than the cache duration.
    pub fn is_up_to_date_cached_version_available(&self) -> bool {
        let _guard = self.lock.lock().expect("cache mutex poisoned");
        self.is_fresh_unlocked()
    }

    /// Read the cached content, if any, regardless of age.
    pub fn cached_content(&self) -> Option<String> {
        let _guard = self.lock.lock().expect("cache mutex poisoned");
        self.content_unlocked()
    }

    /// Freshness check and read as one critical section.
    ///
    /// Returns the cached content only while it is younger than the cache
    /// duration. Callers that test freshness and then read must use this
    /// instead of the two separate calls, or they may race a concurrent
    /// writer between the check and the read.
    pub fn fresh_content(&self) -> Option<String> {
        let _guard = self.lock.lock().expect("cache mutex poisoned");
        if self.is_fresh_unlocked() { self.content_unlocked() } else { None }
    }

    /// Store `content` and stamp the current time as its fetch date.
    ///
    /// Both writes happen under the instance lock so no reader sees new
    /// content with an old timestamp or the reverse.
    pub fn store_content(&self, content: &str) {
        let _guard = self.lock.lock().expect("cache mutex poisoned");
        self.store.set(&self.content_key, content.to_string());
        self.store.set(&self.fetched_at_key, Utc::now().to_rfc3339());
    }

    fn is_fresh_unlocked(&self) -> bool {
        if self.content_unlocked().is_none() {
            return false;
        }

        match self.fetched_at_unlocked() {
            Some(fetched_at) => {
                let max_age = chrono::Duration::from_std(self.duration)
                    .unwrap_or_else(|_| chrono::Duration::MAX);
                Utc::now() - fetched_at < max_age
            }
            // Content without a readable timestamp is treated as stale.
            None => false,
        }
    }

    fn content_unlocked(&self) -> Option<String> {
        self.store.get(&self.content_key)
    }

    fn fetched_at_unlocked(&self) -> Option<DateTime<Utc>> {
        let raw = self.store.get(&self.fetched_at_key)?;
        match DateTime::parse_from_rfc3339(&raw) {
            Ok(dt) => Some(dt.with_timezone(&Utc)),
            Err(e) => {
                tracing::warn!(error = %e, "unreadable cache timestamp, treating entry as stale");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;

    fn cache_with_store(duration: Duration) -> (PageCache, Arc<MemoryStore>) {
        let store = Arc::new(MemoryStore::new());
        let cache = PageCache::new(store.clone(), "https://example.com/page", duration);
        (cache, store)
    }

    #[test]
    fn test_empty_cache_unavailable() {
        let (cache, _) = cache_with_store(Duration::from_secs(5));
        assert!(!cache.is_cached_version_available());
        assert!(!cache.is_up_to_date_cached_version_available());
        assert_eq!(cache.cached_content(), None);
    }

    #[test]
    fn test_fresh_after_write() {
        let (cache, _) = cache_with_store(Duration::from_secs(5));
        cache.store_content("<html></html>");

        assert!(cache.is_cached_version_available());
        assert!(cache.is_up_to_date_cached_version_available());
        assert_eq!(cache.cached_content(), Some("<html></html>".to_string()));
    }

    #[test]
    fn test_stale_after_duration_elapsed() {
        let (cache, store) = cache_with_store(Duration::from_secs(5));
        cache.store_content("<html></html>");

        // Simulate 6 seconds passing by backdating the stored timestamp.
        let stale = Utc::now() - chrono::Duration::seconds(6);
        store.set(&key::fetched_at_key("https://example.com/page"), stale.to_rfc3339());

        assert!(cache.is_cached_version_available());
        assert!(!cache.is_up_to_date_cached_version_available());
        assert_eq!(cache.cached_content(), Some("<html></html>".to_string()));
    }

    #[test]
    fn test_unreadable_timestamp_is_stale() {
        let (cache, store) = cache_with_store(Duration::from_secs(5));
        cache.store_content("<html></html>");
        store.set(&key::fetched_at_key("https://example.com/page"), "not a date".to_string());

        assert!(cache.is_cached_version_available());
        assert!(!cache.is_up_to_date_cached_version_available());
    }

    #[test]
    fn test_store_refreshes_timestamp() {
        let (cache, store) = cache_with_store(Duration::from_secs(5));
        cache.store_content("old");

        let stale = Utc::now() - chrono::Duration::seconds(60);
        store.set(&key::fetched_at_key("https://example.com/page"), stale.to_rfc3339());
        assert!(!cache.is_up_to_date_cached_version_available());

        cache.store_content("new");
        assert!(cache.is_up_to_date_cached_version_available());
        assert_eq!(cache.cached_content(), Some("new".to_string()));
    }

    #[test]
    fn test_fresh_content_combined() {
        let (cache, store) = cache_with_store(Duration::from_secs(5));
        assert_eq!(cache.fresh_content(), None);

        cache.store_content("doc");
        assert_eq!(cache.fresh_content(), Some("doc".to_string()));

        let stale = Utc::now() - chrono::Duration::seconds(6);
        store.set(&key::fetched_at_key("https://example.com/page"), stale.to_rfc3339());
        assert_eq!(cache.fresh_content(), None);
    }

    #[test]
    fn test_urls_do_not_collide() {
        let store = Arc::new(MemoryStore::new());
        let a = PageCache::new(store.clone(), "https://example.com/a", Duration::from_secs(5));
        let b = PageCache::new(store, "https://example.com/b", Duration::from_secs(5));

        a.store_content("content-a");
        assert!(!b.is_cached_version_available());
    }
}
