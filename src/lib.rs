//! Cached State - a client-side cache for async lookups
//!
//! Holds replayable async values under string keys so repeated lookups
//! share one computation. Supports a size bound with LRU, LFU or FIFO
//! eviction and optional time-based expiration.
//!
//! Callers follow one idiom: `get` the key, and on a miss `put` the
//! producer and use the handle `put` returns.

pub mod cache;
pub mod config;
pub mod error;
pub mod tasks;

pub use cache::{CacheStats, CachedState, EvictionStrategy, Replayable};
pub use config::CacheConfig;
pub use error::{CacheError, Result};
pub use tasks::spawn_sweep_task;
