//! Eviction Strategy Module
//!
//! Orders cache entries so the next eviction candidate sits at the tail.

use std::cmp::Reverse;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::cache::CacheEntry;
use crate::error::CacheError;

// == Eviction Strategy ==
/// Policy deciding which entry is dropped first when the cache is over capacity.
///
/// The strategy only orders entries; the store decides when to trim.
/// After [`EvictionStrategy::prioritize`] runs:
/// - Front = most deserving of retention
/// - Back = next eviction candidate
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum EvictionStrategy {
    /// Least recently used entries go to the tail
    #[default]
    Lru,
    /// Least frequently used entries go to the tail, recency breaks ties
    Lfu,
    /// Insertion order, kept by the store inserting at the front
    Fifo,
}

impl EvictionStrategy {
    /// Returns the lowercase configuration name of the strategy.
    pub fn as_str(&self) -> &'static str {
        match self {
            EvictionStrategy::Lru => "lru",
            EvictionStrategy::Lfu => "lfu",
            EvictionStrategy::Fifo => "fifo",
        }
    }

    // == Prioritize ==
    /// Reorders `entries` in place so the least wanted entries end up last.
    ///
    /// Sorting is stable and keyed on `read_seq` as the final tiebreaker,
    /// so the result is fully deterministic.
    pub fn prioritize<T: Clone>(&self, entries: &mut [CacheEntry<T>]) {
        match self {
            EvictionStrategy::Lru => {
                entries.sort_by_key(|e| Reverse((e.read_at, e.read_seq)));
            }
            EvictionStrategy::Lfu => {
                entries.sort_by_key(|e| Reverse((e.read_count, e.read_at, e.read_seq)));
            }
            // Physical order already is insertion order
            EvictionStrategy::Fifo => {}
        }
    }
}

impl fmt::Display for EvictionStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EvictionStrategy {
    type Err = CacheError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "lru" => Ok(EvictionStrategy::Lru),
            "lfu" => Ok(EvictionStrategy::Lfu),
            "fifo" => Ok(EvictionStrategy::Fifo),
            _ => Err(CacheError::UnknownStrategy(s.to_string())),
        }
    }
}

impl TryFrom<String> for EvictionStrategy {
    type Error = CacheError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<EvictionStrategy> for String {
    fn from(strategy: EvictionStrategy) -> Self {
        strategy.as_str().to_string()
    }
}
