//! TTL Cache
//!
//! Thin wrapper over `mini_moka::sync::Cache` used by providers to memoise
//! results per topic. Expiry is lazy (checked on read) and the capacity bound
//! is soft.

use std::future::Future;
use std::hash::Hash;
use std::time::Duration;

use mini_moka::sync::{Cache, ConcurrentCacheExt};

/// Default time-to-live (1 hour)
pub const DEFAULT_TTL_SECS: u64 = 3600;

/// Default maximum entries
pub const DEFAULT_MAX_ENTRIES: u64 = 100;

/// Keyed cache whose entries expire a fixed time after insertion.
#[derive(Clone)]
pub struct TtlCache<K, V> {
    inner: Cache<K, V>,
}

impl<K, V> TtlCache<K, V>
where
    K: Hash + Eq + Send + Sync + 'static,
    V: Clone + Send + Sync + 'static,
{
    pub fn new(ttl: Duration, max_capacity: u64) -> Self {
        let inner = Cache::builder()
            .max_capacity(max_capacity)
            .time_to_live(ttl)
            .build();
        Self { inner }
    }

    pub fn get(&self, key: &K) -> Option<V> {
        self.inner.get(key)
    }

    pub fn insert(&self, key: K, value: V) {
        self.inner.insert(key, value);
    }

    pub fn invalidate(&self, key: &K) {
        self.inner.invalidate(key);
    }

    /// Number of live entries after pending maintenance is applied
    pub fn len(&self) -> u64 {
        self.inner.sync();
        self.inner.entry_count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Return the cached value for `key`, or compute, store and return it.
    ///
    /// Errors are not cached. Two concurrent misses both compute; the later
    /// insert wins.
    pub async fn get_or_try_insert_with<F, Fut, E>(&self, key: K, init: F) -> Result<V, E>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<V, E>>,
    {
        if let Some(hit) = self.inner.get(&key) {
            return Ok(hit);
        }
        let value = init().await?;
        self.inner.insert(key, value.clone());
        Ok(value)
    }
}

impl<K, V> Default for TtlCache<K, V>
where
    K: Hash + Eq + Send + Sync + 'static,
    V: Clone + Send + Sync + 'static,
{
    fn default() -> Self {
        Self::new(Duration::from_secs(DEFAULT_TTL_SECS), DEFAULT_MAX_ENTRIES)
    }
}

impl<K, V> std::fmt::Debug for TtlCache<K, V> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TtlCache").finish_non_exhaustive()
    }
}
