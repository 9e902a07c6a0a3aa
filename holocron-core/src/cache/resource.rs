//! Resource cache fronting the remote API

use crate::cache::{
    key::cache_key,
    store::CacheStore,
    types::{CacheKey, CacheStats, CacheValue, QueryParams},
};
use crate::client::ResourceFetcher;
use crate::config::HolocronConfig;
use crate::error::{HolocronError, Result};
use std::time::Duration;
use tokio::sync::RwLock;
use tracing::{debug, info, warn};

/// Cache that answers resource requests from its store or the remote API
///
/// - Values handed to callers are owned copies; nothing a caller does to
///   a returned value reaches the store or another caller's copy
/// - Every miss is fetched, stored and followed by a whole-document rewrite
/// - Store mutation and rewrites happen under the write guard, so rewrites
///   never interleave
/// - Concurrent misses on the same key are not coalesced; each one fetches
pub struct ResourceCache<F> {
    fetcher: F,

    /// Timeout handed to the fetcher for every request
    timeout: Duration,

    /// Internal storage
    inner: RwLock<CacheState>,
}

struct CacheState {
    store: CacheStore,
    stats: CacheStats,
}

impl<F: ResourceFetcher> ResourceCache<F> {
    /// Create a cache around an already opened store
    pub fn new(store: CacheStore, fetcher: F, timeout: Duration) -> Self {
        info!(
            "Initializing resource cache at {:?} ({} entries, timeout {:?})",
            store.path(),
            store.len(),
            timeout
        );

        let stats = CacheStats {
            entries: store.len(),
            ..Default::default()
        };

        Self {
            fetcher,
            timeout,
            inner: RwLock::new(CacheState { store, stats }),
        }
    }

    /// Load (or create) the store named by the configuration
    pub fn open(config: &HolocronConfig, fetcher: F) -> Result<Self> {
        let store = CacheStore::open(&config.cache_path)?;
        Ok(Self::new(store, fetcher, config.timeout))
    }

    /// Fetch a resource, from the store when present and remotely otherwise
    pub async fn fetch(&self, locator: &str, params: Option<&QueryParams>) -> Result<CacheValue> {
        let key = cache_key(locator, params);

        {
            let mut state = self.inner.write().await;
            let cached = state.store.get(&key);
            if let Some(value) = cached {
                state.stats.hits += 1;
                debug!("Cache hit: {}", key);
                return Ok(value);
            }
            state.stats.misses += 1;
        }

        debug!("Cache miss: {}", key);
        let resource = self.fetcher.get(locator, params, self.timeout).await?;

        let mut state = self.inner.write().await;
        state.stats.fetches += 1;
        state.store.insert(key.clone(), resource.clone());
        state.stats.entries = state.store.len();

        match state.store.persist() {
            Ok(()) => {
                state.stats.writes += 1;
                Ok(resource)
            }
            Err(e) => {
                // The entry stays in memory; only the document is stale.
                state.stats.write_failures += 1;
                warn!("Failed to persist cache after fetching {}: {}", key, e);
                Err(e)
            }
        }
    }

    /// Run a `search` query against a collection and return the first match.
    ///
    /// A response that is not a search envelope (no `results` array) is
    /// returned as is.
    pub async fn search(&self, locator: &str, term: &str) -> Result<CacheValue> {
        let mut params = QueryParams::new();
        params.insert("search".to_string(), term.to_string());

        let mut response = self.fetch(locator, Some(&params)).await?;

        let first = match response.get_mut("results").and_then(|r| r.as_array_mut()) {
            Some(results) if results.is_empty() => {
                return Err(HolocronError::NotFound(format!(
                    "no results for '{}' at {}",
                    term, locator
                )))
            }
            Some(results) => Some(results.swap_remove(0)),
            None => None,
        };

        Ok(first.unwrap_or(response))
    }

    /// Check if a request is already cached (no stats update)
    pub async fn contains(&self, locator: &str, params: Option<&QueryParams>) -> bool {
        let state = self.inner.read().await;
        state.store.contains_key(&cache_key(locator, params))
    }

    /// Cached keys in sorted order
    pub async fn keys(&self) -> Vec<CacheKey> {
        let state = self.inner.read().await;
        state.store.keys()
    }

    /// Get cache statistics
    pub async fn stats(&self) -> CacheStats {
        let state = self.inner.read().await;
        state.stats.clone()
    }

    /// Get number of entries in cache
    pub async fn len(&self) -> usize {
        let state = self.inner.read().await;
        state.store.len()
    }

    /// Check if cache is empty
    pub async fn is_empty(&self) -> bool {
        let state = self.inner.read().await;
        state.store.is_empty()
    }

    /// Drop every entry and rewrite the (now empty) document
    pub async fn clear(&self) -> Result<usize> {
        let mut state = self.inner.write().await;

        let count = state.store.len();
        state.store.clear();
        state.stats.entries = 0;
        state.store.persist()?;
        state.stats.writes += 1;

        info!("Cleared {} entries from cache", count);
        Ok(count)
    }

    /// Rewrite the cache document with the current in-memory entries
    pub async fn flush(&self) -> Result<()> {
        let mut state = self.inner.write().await;
        state.store.persist()?;
        state.stats.writes += 1;
        Ok(())
    }
}
