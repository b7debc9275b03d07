//! Expiry Sweep Task
//!
//! Background task that periodically purges expired cache entries.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::RwLock;
use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::cache::CachedState;

/// Spawns a background task that periodically purges expired entries.
///
/// The task loops forever, sleeping for `interval` between sweeps and
/// taking the write lock only for the purge itself. A cache only ever
/// purges lazily on its own; this is for owners that want expired
/// entries released on a schedule.
///
/// Abort the returned handle to stop the task.
///
/// # Example
/// ```ignore
/// let cache = Arc::new(RwLock::new(CachedState::<String>::with_config(config)?));
/// let sweeper = spawn_sweep_task(cache.clone(), Duration::from_secs(30));
/// // Later, during shutdown:
/// sweeper.abort();
/// ```
pub fn spawn_sweep_task<T>(cache: Arc<RwLock<CachedState<T>>>, interval: Duration) -> JoinHandle<()>
where
    T: Clone + Send + Sync + 'static,
{
    tokio::spawn(async move {
        info!("Starting expiry sweep task with interval of {:?}", interval);

        loop {
            tokio::time::sleep(interval).await;

            let removed = {
                let mut cache_guard = cache.write().await;
                cache_guard.purge_expired()
            };

            if removed > 0 {
                info!("Expiry sweep: removed {} expired entries", removed);
            } else {
                debug!("Expiry sweep: no expired entries found");
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::ManualClock;
    use crate::config::CacheConfig;

    fn shared_cache(expiration_seconds: f64) -> (Arc<RwLock<CachedState<String>>>, Arc<ManualClock>) {
        let clock = Arc::new(ManualClock::default());
        let config = CacheConfig::default().with_expiration_seconds(expiration_seconds);
        let cache = CachedState::with_clock(config, clock.clone()).unwrap();
        (Arc::new(RwLock::new(cache)), clock)
    }

    #[tokio::test]
    async fn test_sweep_task_removes_expired_entries() {
        let (cache, clock) = shared_cache(1.0);

        {
            let mut cache_guard = cache.write().await;
            cache_guard.put("expire_soon", async { "value".to_string() });
        }
        clock.advance(Duration::from_secs(2));

        let handle = spawn_sweep_task(cache.clone(), Duration::from_millis(50));
        tokio::time::sleep(Duration::from_millis(300)).await;

        {
            let cache_guard = cache.read().await;
            assert_eq!(cache_guard.stats().expirations, 1, "Expired entry should have been swept");
            assert!(cache_guard.is_empty());
        }

        handle.abort();
    }

    #[tokio::test]
    async fn test_sweep_task_preserves_live_entries() {
        let (cache, _clock) = shared_cache(3600.0);

        {
            let mut cache_guard = cache.write().await;
            cache_guard.put("long_lived", async { "value".to_string() });
        }

        let handle = spawn_sweep_task(cache.clone(), Duration::from_millis(50));
        tokio::time::sleep(Duration::from_millis(200)).await;

        {
            let mut cache_guard = cache.write().await;
            let hit = cache_guard.get("long_lived");
            assert!(hit.is_some(), "Live entry should not be removed");
            assert_eq!(hit.unwrap().await, "value");
            assert_eq!(cache_guard.stats().expirations, 0);
        }

        handle.abort();
    }

    #[tokio::test]
    async fn test_sweep_task_can_be_aborted() {
        let (cache, _clock) = shared_cache(1.0);

        let handle = spawn_sweep_task(cache, Duration::from_secs(1));
        handle.abort();

        tokio::time::sleep(Duration::from_millis(100)).await;
        assert!(handle.is_finished(), "Task should be finished after abort");
    }
}
