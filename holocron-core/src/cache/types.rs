//! Cache keys, values and counters

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Cache key type - locator plus sorted query string
pub type CacheKey = String;

/// Cache value type - raw record or list of records as the API returned it
pub type CacheValue = serde_json::Value;

/// Query-string parameters; ordered so equal requests produce equal keys
pub type QueryParams = BTreeMap<String, String>;

/// Counters describing how the cache has been used during this run
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct CacheStats {
    /// Lookups answered from the store
    pub hits: u64,

    /// Lookups that had to go to the remote API
    pub misses: u64,

    /// Successful remote fetches
    pub fetches: u64,

    /// Successful rewrites of the cache document
    pub writes: u64,

    /// Rewrites that failed (entry kept in memory)
    pub write_failures: u64,

    /// Number of entries currently in the store
    pub entries: usize,
}

impl CacheStats {
    /// Lookups of any outcome
    pub fn lookups(&self) -> u64 {
        self.hits + self.misses
    }

    /// Share of lookups answered from the store, in percent
    pub fn hit_rate(&self) -> f64 {
        match self.lookups() {
            0 => 0.0,
            total => self.hits as f64 * 100.0 / total as f64,
        }
    }

    /// Share of lookups that went remote, in percent
    pub fn miss_rate(&self) -> f64 {
        match self.lookups() {
            0 => 0.0,
            total => self.misses as f64 * 100.0 / total as f64,
        }
    }
}

impl fmt::Display for CacheStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} hits / {} misses ({:.1}% hit rate), {} fetched, {} writes ({} failed), {} entries",
            self.hits,
            self.misses,
            self.hit_rate(),
            self.fetches,
            self.writes,
            self.write_failures,
            self.entries
        )
    }
}
