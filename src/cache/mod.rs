//! Cache Module
//!
//! Provides an in-memory cache of replayable async values with optional
//! expiration and LRU, LFU or FIFO eviction.

mod clock;
mod entry;
mod replay;
mod stats;
mod store;
mod strategy;


// Re-export public types
pub use clock::{Clock, ManualClock, SystemClock};
pub use entry::CacheEntry;
pub use replay::Replayable;
pub use stats::CacheStats;
pub use store::CachedState;
pub use strategy::EvictionStrategy;
