//! File-backed cache document
//!
//! The whole store is one JSON object mapping cache keys to raw values.
//! Every persist rewrites the document: the new content goes to a sibling
//! `.tmp` file which is then renamed over the target.

use crate::cache::types::{CacheKey, CacheValue};
use crate::error::{HolocronError, Result};
use std::collections::BTreeMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Key/value store persisted to a single JSON document
#[derive(Debug)]
pub struct CacheStore {
    /// Location of the cache document
    path: PathBuf,

    /// Main storage: key -> raw value
    entries: BTreeMap<CacheKey, CacheValue>,
}

impl CacheStore {
    /// Create an empty store bound to `path` without touching the filesystem
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            entries: BTreeMap::new(),
        }
    }

    /// Load the store from `path`, or start empty when the file does not exist
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();

        let content = match fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                info!("No cache document at {:?}, starting with an empty store", path);
                return Ok(Self::new(path));
            }
            Err(e) => return Err(HolocronError::persistence(&path, e)),
        };

        let entries: BTreeMap<CacheKey, CacheValue> = if content.trim().is_empty() {
            BTreeMap::new()
        } else {
            serde_json::from_str(&content).map_err(|e| {
                HolocronError::persistence(&path, format!("malformed cache document: {}", e))
            })?
        };

        info!("Loaded {} cached resources from {:?}", entries.len(), path);
        Ok(Self { path, entries })
    }

    /// Location of the cache document
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Get an owned copy of a cached value
    pub fn get(&self, key: &str) -> Option<CacheValue> {
        self.entries.get(key).cloned()
    }

    /// Check if a key exists in the store
    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Insert or replace a value (in memory only; see [`CacheStore::persist`])
    pub fn insert(&mut self, key: CacheKey, value: CacheValue) {
        debug!("Storing cache entry: {}", key);
        self.entries.insert(key, value);
    }

    /// Remove a value (in memory only)
    pub fn remove(&mut self, key: &str) -> Option<CacheValue> {
        self.entries.remove(key)
    }

    /// Drop every entry (in memory only)
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the store is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Cached keys in sorted order
    pub fn keys(&self) -> Vec<CacheKey> {
        self.entries.keys().cloned().collect()
    }

    /// Rewrite the whole cache document
    pub fn persist(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|e| HolocronError::persistence(parent, e))?;
            }
        }

        let body = serde_json::to_string_pretty(&self.entries)?;

        let mut tmp = self.path.clone().into_os_string();
        tmp.push(".tmp");
        let tmp = PathBuf::from(tmp);

        fs::write(&tmp, body).map_err(|e| HolocronError::persistence(&tmp, e))?;
        fs::rename(&tmp, &self.path).map_err(|e| HolocronError::persistence(&self.path, e))?;

        debug!("Persisted {} entries to {:?}", self.entries.len(), self.path);
        Ok(())
    }
}
