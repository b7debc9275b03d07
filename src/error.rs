//! Error types for the cache
//!
//! Provides unified error handling using thiserror.
//!
//! Only configuration can fail. A cache miss is `None`, and failures of a
//! cached value live inside the value type itself.

use thiserror::Error;

// == Cache Error Enum ==
/// Unified error type for the cache.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CacheError {
    /// Eviction strategy name is not one of `lru`, `lfu`, `fifo`
    #[error("Unknown eviction strategy: '{0}' (expected one of: lru, lfu, fifo)")]
    UnknownStrategy(String),

    /// Configuration value is out of range or unparsable
    #[error("Invalid cache configuration: {0}")]
    InvalidConfig(String),
}

// == Result Type Alias ==
/// Convenience Result type for the cache.
pub type Result<T> = std::result::Result<T, CacheError>;
