//! Clock Module
//!
//! Source of "now" for expiration and recency bookkeeping.

use std::fmt::Debug;
use std::sync::atomic::{AtomicI64, Ordering};
use std::time::Duration;

use chrono::{DateTime, Utc};

/// Supplies the current instant to a cache.
pub trait Clock: Send + Sync + Debug {
    fn now(&self) -> DateTime<Utc>;
}

// == System Clock ==
/// Wall clock time.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

// == Manual Clock ==
/// A clock that only moves when told to.
///
/// Used to drive expiration deterministically in tests and simulations.
#[derive(Debug)]
pub struct ManualClock {
    start: DateTime<Utc>,
    /// Milliseconds elapsed since `start`
    offset_ms: AtomicI64,
}

impl ManualClock {
    /// Creates a clock frozen at `start`.
    pub fn new(start: DateTime<Utc>) -> Self {
        Self {
            start,
            offset_ms: AtomicI64::new(0),
        }
    }

    /// Moves the clock forward by `by`, with millisecond resolution.
    pub fn advance(&self, by: Duration) {
        let ms = i64::try_from(by.as_millis()).unwrap_or(i64::MAX);
        self.offset_ms
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |cur| {
                Some(cur.saturating_add(ms))
            })
            .ok();
    }

    /// Jumps the clock to `instant`, which may be before the current time.
    pub fn set(&self, instant: DateTime<Utc>) {
        let offset = (instant - self.start).num_milliseconds();
        self.offset_ms.store(offset, Ordering::SeqCst);
    }
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new(Utc::now())
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        let offset = chrono::Duration::milliseconds(self.offset_ms.load(Ordering::SeqCst));
        self.start.checked_add_signed(offset).unwrap_or(DateTime::<Utc>::MAX_UTC)
    }
}
