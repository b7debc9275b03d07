//! Cached State Module
//!
//! The cache itself: an ordered list of entries with size-bounded eviction,
//! optional expiration, and replayable values.

use std::future::Future;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::{debug, trace};

use crate::cache::{CacheEntry, CacheStats, Clock, EvictionStrategy, Replayable, SystemClock};
use crate::config::CacheConfig;
use crate::error::Result;

// == Cached State ==
/// Bounded, optionally expiring map from string keys to replayable async values.
///
/// The cache never starts work on its own. Callers look a key up with
/// [`CachedState::get`] and, on a miss, hand their producer to
/// [`CachedState::put`], returning the handle it gives back:
///
/// ```
/// # use cached_state::CachedState;
/// let mut cache: CachedState<u32> = CachedState::new();
/// let value = match cache.get("answer") {
///     Some(hit) => hit,
///     None => cache.put("answer", async { 42 }),
/// };
/// assert_eq!(tokio_test::block_on(value), 42);
/// ```
///
/// Storage order is priority order: the front holds the entries most
/// deserving of retention and trimming cuts from the back.
#[derive(Debug)]
pub struct CachedState<T: Clone> {
    /// Entries in priority order, at most one per key
    entries: Vec<CacheEntry<T>>,
    config: CacheConfig,
    clock: Arc<dyn Clock>,
    /// Monotonic counter stamped on inserts and reads
    sequence: u64,
    stats: CacheStats,
}

impl<T: Clone> CachedState<T> {
    // == Constructors ==
    /// Creates an unbounded, non-expiring LRU cache.
    pub fn new() -> Self {
        Self::build(CacheConfig::default(), Arc::new(SystemClock))
    }

    /// Creates a cache from a validated configuration.
    pub fn with_config(config: CacheConfig) -> Result<Self> {
        Self::with_clock(config, Arc::new(SystemClock))
    }

    /// Creates a cache that reads time from `clock`.
    pub fn with_clock(config: CacheConfig, clock: Arc<dyn Clock>) -> Result<Self> {
        config.validate()?;
        Ok(Self::build(config, clock))
    }

    fn build(config: CacheConfig, clock: Arc<dyn Clock>) -> Self {
        debug!(
            "Creating cache: max_size={:?}, expiration_seconds={:?}, strategy={}",
            config.max_size, config.expiration_seconds, config.eviction_strategy
        );
        Self {
            entries: Vec::new(),
            config,
            clock,
            sequence: 0,
            stats: CacheStats::new(),
        }
    }

    pub fn config(&self) -> &CacheConfig {
        &self.config
    }

    pub fn eviction_strategy(&self) -> EvictionStrategy {
        self.config.eviction_strategy
    }

    // == Get ==
    /// Returns the cached handle for `key`, or None if absent or expired.
    ///
    /// A miss never fetches anything; the caller is expected to `put`.
    /// An expired entry found here is removed. A hit bumps the entry's read
    /// count and read time and re-prioritizes the cache.
    pub fn get(&mut self, key: &str) -> Option<Replayable<T>> {
        let now = self.clock.now();

        let Some(index) = self.position(key) else {
            trace!("Cache miss: {}", key);
            self.stats.record_miss();
            return None;
        };

        if self.entries[index].is_expired(now) {
            self.entries.remove(index);
            debug!("Removed expired entry on read: {}", key);
            self.stats.record_expirations(1);
            self.stats.record_miss();
            return None;
        }

        let seq = self.next_sequence();
        let entry = &mut self.entries[index];
        entry.touch(now, seq);
        let value = entry.value.clone();

        self.config.eviction_strategy.prioritize(&mut self.entries);
        trace!("Cache hit: {}", key);
        self.stats.record_hit();
        Some(value)
    }

    // == Put ==
    /// Stores `value` under `key` and returns its replayable handle.
    ///
    /// Any previous entry for `key` is replaced. The producer is wrapped,
    /// not polled: it starts on the first await of any handle and runs once.
    ///
    /// After inserting, entries are re-prioritized; if more than `max_size`
    /// live entries remain, expired entries are dropped and then the tail is
    /// cut. Under LFU a fresh entry can be the one cut, in which case the
    /// returned handle still works but is not cached.
    pub fn put<F>(&mut self, key: impl Into<String>, value: F) -> Replayable<T>
    where
        F: Future<Output = T> + Send + 'static,
    {
        let key = key.into();
        let now = self.clock.now();

        if self.remove_entry(&key) {
            debug!("Replacing cached entry: {}", key);
        }

        let value = Replayable::new(value);
        let expires_at = self.expiration_from(now);
        let seq = self.next_sequence();
        self.entries
            .insert(0, CacheEntry::new(key, value.clone(), expires_at, now, seq));

        self.config.eviction_strategy.prioritize(&mut self.entries);
        self.trim(now);

        value
    }

    // == Get Or Put ==
    /// Returns the cached handle for `key`, calling `producer` only on a miss.
    pub fn get_or_put_with<F, P>(&mut self, key: impl Into<String>, producer: P) -> Replayable<T>
    where
        F: Future<Output = T> + Send + 'static,
        P: FnOnce() -> F,
    {
        let key = key.into();
        match self.get(&key) {
            Some(hit) => hit,
            None => self.put(key, producer()),
        }
    }

    // == Remove ==
    /// Removes the entry for `key`. Returns false if there was none.
    pub fn remove(&mut self, key: &str) -> bool {
        let removed = self.remove_entry(key);
        if removed {
            debug!("Removed entry: {}", key);
        }
        removed
    }

    // == Clear ==
    /// Forgets every entry. Statistics counters are kept.
    pub fn clear(&mut self) {
        debug!("Clearing cache with {} stored entries", self.entries.len());
        self.entries.clear();
    }

    // == Keys ==
    /// Keys of live entries in priority order, most likely to survive first.
    ///
    /// Expired entries are skipped but not purged.
    pub fn keys(&self) -> Vec<String> {
        let now = self.clock.now();
        self.entries
            .iter()
            .filter(|e| !e.is_expired(now))
            .map(|e| e.key.clone())
            .collect()
    }

    // == Length ==
    /// Number of live entries. Expired entries are skipped but not purged.
    pub fn len(&self) -> usize {
        self.live_count(self.clock.now())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// True if `key` holds a live entry. Does not count as a read.
    pub fn contains_key(&self, key: &str) -> bool {
        let now = self.clock.now();
        self.entries
            .iter()
            .any(|e| e.key == key && !e.is_expired(now))
    }

    // == Purge Expired ==
    /// Physically removes all expired entries.
    ///
    /// Returns the number of entries removed.
    pub fn purge_expired(&mut self) -> usize {
        let now = self.clock.now();
        self.drop_expired(now)
    }

    // == Stats ==
    /// Returns current cache statistics.
    pub fn stats(&self) -> CacheStats {
        let mut stats = self.stats.clone();
        stats.set_live_entries(self.len());
        stats
    }

    /// Zeroes the hit, miss, eviction and expiration counters.
    pub fn reset_stats(&mut self) {
        self.stats = CacheStats::new();
    }

    // == Internal Helpers ==
    fn position(&self, key: &str) -> Option<usize> {
        self.entries.iter().position(|e| e.key == key)
    }

    fn remove_entry(&mut self, key: &str) -> bool {
        match self.position(key) {
            Some(index) => {
                self.entries.remove(index);
                true
            }
            None => false,
        }
    }

    fn next_sequence(&mut self) -> u64 {
        self.sequence += 1;
        self.sequence
    }

    /// None when expiration is off or the deadline is out of range.
    fn expiration_from(&self, now: DateTime<Utc>) -> Option<DateTime<Utc>> {
        self.config
            .expiration()
            .and_then(|ttl| now.checked_add_signed(ttl))
    }

    fn live_count(&self, now: DateTime<Utc>) -> usize {
        self.entries.iter().filter(|e| !e.is_expired(now)).count()
    }

    fn drop_expired(&mut self, now: DateTime<Utc>) -> usize {
        let before = self.entries.len();
        self.entries.retain(|e| !e.is_expired(now));
        let removed = before - self.entries.len();
        if removed > 0 {
            debug!("Purged {} expired entries", removed);
            self.stats.record_expirations(removed);
        }
        removed
    }

    /// Enforces `max_size` on an already prioritized list.
    fn trim(&mut self, now: DateTime<Utc>) {
        let Some(max_size) = self.config.max_size else {
            return;
        };
        if self.live_count(now) <= max_size {
            return;
        }

        self.drop_expired(now);

        if self.entries.len() > max_size {
            let evicted: Vec<String> = self.entries[max_size..]
                .iter()
                .map(|e| e.key.clone())
                .collect();
            self.entries.truncate(max_size);
            debug!(
                "Evicted {} entries over max size {} ({}): {:?}",
                evicted.len(),
                max_size,
                self.config.eviction_strategy,
                evicted
            );
            self.stats.record_evictions(evicted.len());
        }
    }
}

impl<T: Clone> Default for CachedState<T> {
    fn default() -> Self {
        Self::new()
    }
}
