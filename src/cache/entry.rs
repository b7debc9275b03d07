//! Cache Entry Module
//!
//! Defines the record kept for each cached key: the replayable value plus
//! expiration and access bookkeeping.

use chrono::{DateTime, Utc};

use crate::cache::Replayable;

// == Cache Entry ==
/// A single cache entry with value and metadata.
///
/// Entries are created by `put` and owned exclusively by one cache.
/// `read_at`, `read_count` and `read_seq` change only on a successful `get`.
#[derive(Debug)]
pub struct CacheEntry<T: Clone> {
    pub(crate) key: String,
    pub(crate) value: Replayable<T>,
    /// Entry is expired once now is past this instant, None = never expires
    pub(crate) expires_at: Option<DateTime<Utc>>,
    /// Instant of the most recent read (creation time until first `get`)
    pub(crate) read_at: DateTime<Utc>,
    /// Starts at 1 on creation
    pub(crate) read_count: u64,
    /// Cache-wide access sequence number, orders reads within one timestamp
    pub(crate) read_seq: u64,
}

impl<T: Clone> CacheEntry<T> {
    // == Constructor ==
    /// Creates a new entry as of `now`.
    pub(crate) fn new(
        key: String,
        value: Replayable<T>,
        expires_at: Option<DateTime<Utc>>,
        now: DateTime<Utc>,
        read_seq: u64,
    ) -> Self {
        Self {
            key,
            value,
            expires_at,
            read_at: now,
            read_count: 1,
            read_seq,
        }
    }

    // == Is Expired ==
    /// Checks if the entry has expired as of `now`.
    ///
    /// Boundary condition: an entry is still live exactly at its expiration
    /// instant and expired strictly after it.
    pub(crate) fn is_expired(&self, now: DateTime<Utc>) -> bool {
        match self.expires_at {
            Some(expires) => now > expires,
            None => false,
        }
    }

    // == Touch ==
    /// Records a successful read.
    pub(crate) fn touch(&mut self, now: DateTime<Utc>, read_seq: u64) {
        self.read_count += 1;
        self.read_at = now;
        self.read_seq = read_seq;
    }
}
