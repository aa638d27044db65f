/*!
 * Mock cache implementations for testing
 *
 * This module provides listing-cache implementations for observing and
 * disrupting cache traffic: a tracking wrapper that counts calls before
 * delegating to the real in-memory cache, and an always-failing cache used
 * to prove that store operations survive a cache outage.
 */

use std::sync::{Arc, Mutex};
use std::time::Duration;

use lexistore::cache::{CachedPage, ListingCache, ListingKey, MemoryListingCache};
use lexistore::errors::CacheError;

/// Tracks cache traffic so tests can assert on hit and invalidation behavior
#[derive(Debug, Default)]
pub struct CacheCallTracker {
    /// Number of get calls observed
    pub get_count: usize,
    /// Number of set calls observed
    pub set_count: usize,
    /// Locales passed to invalidate_locale, in order
    pub invalidated: Vec<String>,
}

/// Listing cache that records every call before delegating to a real
/// in-memory cache
pub struct TrackingCache {
    inner: MemoryListingCache,
    tracker: Arc<Mutex<CacheCallTracker>>,
}

impl TrackingCache {
    /// Create a new tracking cache over an empty in-memory cache
    pub fn new() -> Self {
        TrackingCache {
            inner: MemoryListingCache::new(),
            tracker: Arc::new(Mutex::new(CacheCallTracker::default())),
        }
    }

    /// Get the call tracker
    pub fn tracker(&self) -> Arc<Mutex<CacheCallTracker>> {
        self.tracker.clone()
    }
}

impl Default for TrackingCache {
    fn default() -> Self {
        Self::new()
    }
}

impl ListingCache for TrackingCache {
    fn get(&self, key: &ListingKey) -> Result<Option<CachedPage>, CacheError> {
        self.tracker.lock().unwrap().get_count += 1;
        self.inner.get(key)
    }

    fn set(&self, key: ListingKey, page: CachedPage, ttl: Duration) -> Result<(), CacheError> {
        self.tracker.lock().unwrap().set_count += 1;
        self.inner.set(key, page, ttl)
    }

    fn invalidate_locale(&self, locale: &str) -> Result<(), CacheError> {
        self.tracker
            .lock()
            .unwrap()
            .invalidated
            .push(locale.to_string());
        self.inner.invalidate_locale(locale)
    }
}

/// Listing cache where every operation fails
#[derive(Debug, Default)]
pub struct FailingCache;

impl FailingCache {
    /// Create a new always-failing cache
    pub fn new() -> Self {
        FailingCache
    }
}

impl ListingCache for FailingCache {
    fn get(&self, _key: &ListingKey) -> Result<Option<CachedPage>, CacheError> {
        Err(CacheError("cache backend unavailable".to_string()))
    }

    fn set(&self, _key: ListingKey, _page: CachedPage, _ttl: Duration) -> Result<(), CacheError> {
        Err(CacheError("cache backend unavailable".to_string()))
    }

    fn invalidate_locale(&self, _locale: &str) -> Result<(), CacheError> {
        Err(CacheError("cache backend unavailable".to_string()))
    }
}
