use std::future::Future;
use std::sync::Arc;
use std::time::{Duration, Instant};

use dashmap::DashMap;
use tokio::sync::{Mutex, OwnedMutexGuard};
use tracing::debug;

use crate::cache::clock::{Clock, SystemClock};

#[derive(Debug, Clone)]
struct CacheEntry<V> {
    value: V,
    fetched_at: Instant,
}

/// Key → value map whose entries go stale `ttl` after they were stored.
///
/// Stale entries are ignored by [`TtlCache::get`] and stay in place until they
/// are overwritten, swept, or evicted to make room for a new key. The map never
/// holds more than `capacity` keys.
///
/// Concurrent misses for the same key are coalesced by
/// [`TtlCache::get_or_try_insert_with`]: only one caller fetches, the others wait
/// for it and then read its result from the cache.
pub struct TtlCache<V> {
    name: &'static str,
    ttl: Duration,
    capacity: usize,
    clock: Arc<dyn Clock>,
    entries: DashMap<String, CacheEntry<V>>,
    in_flight: DashMap<String, Arc<Mutex<()>>>,
}

impl<V: Clone> TtlCache<V> {
    pub fn new(name: &'static str, ttl: Duration, capacity: usize) -> Self {
        Self::with_clock(name, ttl, capacity, Arc::new(SystemClock))
    }

    pub fn with_clock(
        name: &'static str,
        ttl: Duration,
        capacity: usize,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            name,
            ttl,
            capacity: capacity.max(1),
            clock,
            entries: DashMap::new(),
            in_flight: DashMap::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn is_fresh(&self, entry: &CacheEntry<V>, now: Instant) -> bool {
        now.saturating_duration_since(entry.fetched_at) < self.ttl
    }

    /// Returns the value only while it is fresh
    pub fn get(&self, key: &str) -> Option<V> {
        let now = self.clock.now();
        let entry = self.entries.get(key)?;

        if self.is_fresh(&entry, now) {
            Some(entry.value.clone())
        } else {
            None
        }
    }

    /// Stores `value` stamped with the current time, replacing any previous entry
    pub fn put(&self, key: impl Into<String>, value: V) {
        let key = key.into();

        if !self.entries.contains_key(&key) && self.entries.len() >= self.capacity {
            self.make_room();
        }

        self.entries.insert(
            key,
            CacheEntry {
                value,
                fetched_at: self.clock.now(),
            },
        );
    }

    pub fn invalidate(&self, key: &str) {
        self.entries.remove(key);
    }

    /// Removes every stale entry and returns how many were dropped
    pub fn sweep(&self) -> usize {
        let now = self.clock.now();
        let before = self.entries.len();
        self.entries.retain(|_, entry| self.is_fresh(entry, now));
        before.saturating_sub(self.entries.len())
    }

    fn make_room(&self) {
        let swept = self.sweep();
        if swept > 0 {
            debug!(cache = self.name, swept, "dropped stale entries to make room");
        }

        if self.entries.len() < self.capacity {
            return;
        }

        let oldest = self
            .entries
            .iter()
            .min_by_key(|entry| entry.fetched_at)
            .map(|entry| entry.key().clone());

        if let Some(key) = oldest {
            debug!(cache = self.name, key = %key, "evicting oldest entry");
            self.entries.remove(&key);
        }
    }

    /// Returns the fresh cached value for `key`, or runs `fetch` and caches its
    /// success. Errors are returned as-is and leave the cache untouched.
    pub async fn get_or_try_insert_with<F, Fut, E>(&self, key: &str, fetch: F) -> Result<V, E>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<V, E>>,
    {
        if let Some(value) = self.get(key) {
            debug!(cache = self.name, key, "cache hit");
            return Ok(value);
        }

        let lock = self.in_flight.entry(key.to_string()).or_default().clone();
        let _in_flight = InFlight {
            map: &self.in_flight,
            key,
            guard: Some(lock.lock_owned().await),
        };

        // Another caller may have filled the entry while we waited
        if let Some(value) = self.get(key) {
            debug!(cache = self.name, key, "cache filled by concurrent request");
            return Ok(value);
        }

        debug!(cache = self.name, key, "cache miss");
        let value = fetch().await?;
        self.put(key, value.clone());

        Ok(value)
    }
}

/// Holds the per-key fetch lock; unregisters the key once nobody else waits on it
struct InFlight<'a> {
    map: &'a DashMap<String, Arc<Mutex<()>>>,
    key: &'a str,
    guard: Option<OwnedMutexGuard<()>>,
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        drop(self.guard.take());
        self.map
            .remove_if(self.key, |_, lock| Arc::strong_count(lock) == 1);
    }
}
