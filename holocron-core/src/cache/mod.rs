//! # Resource Cache
//!
//! Key/value store that mediates every remote access.
//!
//! ## Features
//!
//! - **Deterministic keys**: locator plus query parameters sorted by name
//! - **Durable**: the whole store is one JSON document, rewritten after
//!   every miss
//! - **Isolated values**: callers always receive owned copies
//! - **Serialized writes**: store mutation happens under a write guard
//!
//! ## Example
//!
//! ```no_run
//! use holocron_core::cache::{CacheStore, ResourceCache};
//! use holocron_core::client::SwapiClient;
//! use std::time::Duration;
//!
//! # async fn example() -> anyhow::Result<()> {
//! let store = CacheStore::open("./CACHE.json")?;
//! let cache = ResourceCache::new(store, SwapiClient::new()?, Duration::from_secs(10));
//!
//! // Remote on the first call, from the store afterwards
//! let luke = cache.fetch("https://swapi.py4e.com/api/people/1/", None).await?;
//! println!("{}", luke["name"]);
//!
//! let tatooine = cache.search("https://swapi.py4e.com/api/planets/", "tatooine").await?;
//! println!("{}", tatooine["population"]);
//! # Ok(())
//! # }
//! ```

pub mod key;
pub mod resource;
pub mod store;
pub mod types;

pub use key::{cache_key, CacheKeyBuilder};
pub use resource::ResourceCache;
pub use store::CacheStore;
pub use types::{CacheKey, CacheStats, CacheValue, QueryParams};
