//! Cache key derivation
//!
//! A key is the resource locator, followed by `?` and the query parameters
//! sorted by name and form-urlencoded when there are any. Parameter
//! insertion order never changes the key, and two requests that send
//! different query strings never share one.

use crate::cache::types::{CacheKey, QueryParams};
use url::form_urlencoded;

/// Cache key builder for resource requests
pub struct CacheKeyBuilder {
    locator: String,
    params: Vec<(String, String)>,
}

impl CacheKeyBuilder {
    /// Create a new cache key builder for a resource locator
    pub fn new(locator: impl Into<String>) -> Self {
        Self {
            locator: locator.into(),
            params: Vec::new(),
        }
    }

    /// Add a parameter to the key
    pub fn param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.push((key.into(), value.into()));
        self
    }

    /// Add every parameter of a query map
    pub fn params(mut self, params: &QueryParams) -> Self {
        self.params
            .extend(params.iter().map(|(k, v)| (k.clone(), v.clone())));
        self
    }

    /// Build the cache key
    pub fn build(mut self) -> CacheKey {
        if self.params.is_empty() {
            return self.locator;
        }

        // Later duplicates win, matching how a query map would be filled.
        self.params.sort_by(|a, b| a.0.cmp(&b.0));
        let mut deduped: Vec<(String, String)> = Vec::with_capacity(self.params.len());
        for (k, v) in self.params {
            match deduped.last_mut() {
                Some(last) if last.0 == k => last.1 = v,
                _ => deduped.push((k, v)),
            }
        }

        let query = form_urlencoded::Serializer::new(String::new())
            .extend_pairs(deduped.iter())
            .finish();

        format!("{}?{}", self.locator, query)
    }
}

/// Derive the cache key for a locator and optional query parameters
pub fn cache_key(locator: &str, params: Option<&QueryParams>) -> CacheKey {
    match params {
        Some(params) => CacheKeyBuilder::new(locator).params(params).build(),
        None => CacheKeyBuilder::new(locator).build(),
    }
}
