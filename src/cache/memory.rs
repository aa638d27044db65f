/*!
 * In-memory TTL cache for listing pages.
 *
 * Entries expire lazily: an expired entry is treated as a miss and evicted
 * on the read that finds it. There is no background sweeper.
 */

use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use log::debug;
use parking_lot::RwLock;

use crate::errors::CacheError;

use super::{CachedPage, ListingCache, ListingKey};

/// A cached page together with its expiry instant
#[derive(Debug, Clone)]
struct Entry {
    page: CachedPage,
    expires_at: Instant,
}

/// Outcome of a read-locked lookup, resolved before any counter or
/// eviction write
enum Lookup {
    Hit(CachedPage),
    Expired,
    Missing,
}

/// In-memory listing cache with per-entry TTL
pub struct MemoryListingCache {
    /// Internal cache storage
    entries: Arc<RwLock<HashMap<ListingKey, Entry>>>,

    /// Cache hit counter
    hits: Arc<RwLock<usize>>,

    /// Cache miss counter
    misses: Arc<RwLock<usize>>,
}

impl MemoryListingCache {
    /// Create a new empty cache
    pub fn new() -> Self {
        Self {
            entries: Arc::new(RwLock::new(HashMap::new())),
            hits: Arc::new(RwLock::new(0)),
            misses: Arc::new(RwLock::new(0)),
        }
    }

    /// Get cache statistics as (hits, misses, hit_rate)
    pub fn stats(&self) -> (usize, usize, f64) {
        let hits = *self.hits.read();
        let misses = *self.misses.read();
        let total = hits + misses;

        let hit_rate = if total > 0 {
            hits as f64 / total as f64
        } else {
            0.0
        };

        (hits, misses, hit_rate)
    }

    /// Clear all entries and reset counters
    pub fn clear(&self) {
        let mut entries = self.entries.write();
        entries.clear();

        let mut hits = self.hits.write();
        *hits = 0;

        let mut misses = self.misses.write();
        *misses = 0;

        debug!("Listing cache cleared");
    }

    /// Get the number of entries in the cache, expired ones included
    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    /// Check if the cache is empty
    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }
}

impl ListingCache for MemoryListingCache {
    fn get(&self, key: &ListingKey) -> Result<Option<CachedPage>, CacheError> {
        let now = Instant::now();

        let lookup = {
            let entries = self.entries.read();
            match entries.get(key) {
                Some(entry) if entry.expires_at > now => Lookup::Hit(entry.page.clone()),
                Some(_) => Lookup::Expired,
                None => Lookup::Missing,
            }
        };

        match lookup {
            Lookup::Hit(page) => {
                let mut hits = self.hits.write();
                *hits += 1;

                debug!("Cache hit for '{}'", key);
                Ok(Some(page))
            }
            Lookup::Expired => {
                // Evict lazily; re-check under the write lock in case a
                // concurrent set refreshed the entry in the meantime.
                let mut entries = self.entries.write();
                if entries.get(key).is_some_and(|entry| entry.expires_at <= now) {
                    entries.remove(key);
                }
                drop(entries);

                let mut misses = self.misses.write();
                *misses += 1;

                debug!("Cache entry expired for '{}'", key);
                Ok(None)
            }
            Lookup::Missing => {
                let mut misses = self.misses.write();
                *misses += 1;

                debug!("Cache miss for '{}'", key);
                Ok(None)
            }
        }
    }

    fn set(&self, key: ListingKey, page: CachedPage, ttl: Duration) -> Result<(), CacheError> {
        let entry = Entry {
            page,
            expires_at: Instant::now() + ttl,
        };

        debug!("Caching listing page under '{}' for {:?}", key, ttl);

        let mut entries = self.entries.write();
        entries.insert(key, entry);

        Ok(())
    }

    fn invalidate_locale(&self, locale: &str) -> Result<(), CacheError> {
        let mut entries = self.entries.write();
        let before = entries.len();
        entries.retain(|key, _| key.locale() != locale);
        let dropped = before - entries.len();

        debug!("Invalidated {} cached page(s) for locale '{}'", dropped, locale);

        Ok(())
    }
}

impl Default for MemoryListingCache {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for MemoryListingCache {
    fn clone(&self) -> Self {
        Self {
            entries: self.entries.clone(),
            hits: self.hits.clone(),
            misses: self.misses.clone(),
        }
    }
}
