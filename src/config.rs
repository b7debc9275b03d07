//! Configuration Module
//!
//! Cache configuration: defaults, validation, and loading from environment
//! variables or JSON.

use std::env;

use serde::{Deserialize, Serialize};

use crate::cache::EvictionStrategy;
use crate::error::{CacheError, Result};

// == Environment Variables ==
pub const ENV_MAX_SIZE: &str = "CACHE_MAX_SIZE";
pub const ENV_EXPIRATION_SECONDS: &str = "CACHE_EXPIRATION_SECONDS";
pub const ENV_EVICTION_STRATEGY: &str = "CACHE_EVICTION_STRATEGY";

/// Cache configuration parameters.
///
/// Immutable once handed to a cache. Defaults: no size bound, no
/// expiration, LRU eviction.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CacheConfig {
    /// Maximum number of live entries, None = unlimited
    pub max_size: Option<usize>,
    /// Entry lifetime in seconds (fractions allowed), None = never expires
    pub expiration_seconds: Option<f64>,
    /// Ordering applied before trimming to `max_size`
    pub eviction_strategy: EvictionStrategy,
}

impl CacheConfig {
    pub fn with_max_size(mut self, max_size: usize) -> Self {
        self.max_size = Some(max_size);
        self
    }

    pub fn with_expiration_seconds(mut self, seconds: f64) -> Self {
        self.expiration_seconds = Some(seconds);
        self
    }

    pub fn with_eviction_strategy(mut self, strategy: EvictionStrategy) -> Self {
        self.eviction_strategy = strategy;
        self
    }

    // == Validate ==
    /// Rejects a zero size bound and non-positive or non-finite lifetimes.
    pub fn validate(&self) -> Result<()> {
        if self.max_size == Some(0) {
            return Err(CacheError::InvalidConfig(
                "maxSize must be a positive integer".to_string(),
            ));
        }
        if let Some(seconds) = self.expiration_seconds {
            if !seconds.is_finite() || seconds <= 0.0 {
                return Err(CacheError::InvalidConfig(format!(
                    "expirationSeconds must be a positive number, got {}",
                    seconds
                )));
            }
        }
        Ok(())
    }

    /// Entry lifetime as a duration, rounded to whole milliseconds.
    pub fn expiration(&self) -> Option<chrono::Duration> {
        self.expiration_seconds
            .map(|seconds| chrono::Duration::milliseconds((seconds * 1000.0).round() as i64))
    }

    // == From JSON ==
    /// Parses and validates a JSON object such as
    /// `{"maxSize": 50, "expirationSeconds": 300, "evictionStrategy": "lfu"}`.
    ///
    /// Every field is optional.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: CacheConfig = serde_json::from_str(json)
            .map_err(|e| CacheError::InvalidConfig(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    // == From Env ==
    /// Loads configuration from environment variables.
    ///
    /// # Environment Variables
    /// - `CACHE_MAX_SIZE` - Maximum live entries (default: unlimited)
    /// - `CACHE_EXPIRATION_SECONDS` - Entry lifetime in seconds (default: never)
    /// - `CACHE_EVICTION_STRATEGY` - `lru`, `lfu` or `fifo` (default: lru)
    ///
    /// Unset variables keep their defaults; set but unparsable ones are errors.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = CacheConfig::default();

        if let Some(raw) = lookup(ENV_MAX_SIZE) {
            let max_size = raw.trim().parse::<usize>().map_err(|_| {
                CacheError::InvalidConfig(format!("{} is not an integer: '{}'", ENV_MAX_SIZE, raw))
            })?;
            config.max_size = Some(max_size);
        }

        if let Some(raw) = lookup(ENV_EXPIRATION_SECONDS) {
            let seconds = raw.trim().parse::<f64>().map_err(|_| {
                CacheError::InvalidConfig(format!(
                    "{} is not a number: '{}'",
                    ENV_EXPIRATION_SECONDS, raw
                ))
            })?;
            config.expiration_seconds = Some(seconds);
        }

        if let Some(raw) = lookup(ENV_EVICTION_STRATEGY) {
            config.eviction_strategy = raw.parse()?;
        }

        config.validate()?;
        Ok(config)
    }
}
