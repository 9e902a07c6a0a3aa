//! # Holocron core
//!
//! Fetch, cache and normalize records from the Star Wars API.
//!
//! ## Features
//!
//! - Durable resource cache keyed by locator and sorted query parameters
//! - Total value coercions (integers, floats, lists, year/era, gravity)
//! - Configurable null canonicalization
//! - Per-kind mapping specifications with fixed coercion tables
//! - Supplementary datasets overlaid on API records before normalization
//! - Recursive resolution of person homeworld and species
//!
//! ## Pipeline
//!
//! ```no_run
//! use holocron_core::{
//!     EntityBuilder, EntityKind, HolocronConfig, ResourceCache, Resolver,
//!     SupplementaryData, SwapiClient,
//! };
//! use serde_json::json;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = HolocronConfig::from_env()?;
//!     let cache = ResourceCache::open(&config, SwapiClient::new()?)?;
//!     let builder = EntityBuilder::default();
//!     let supplementary = SupplementaryData::new().with_dataset(
//!         EntityKind::Planet,
//!         vec![json!({"name": "Tatooine", "region": "Outer Rim Territories"})],
//!     );
//!
//!     let resolver = Resolver::new(&cache, &builder, &supplementary);
//!     let endpoint = EntityKind::Person.endpoint(&config.api_base);
//!     let obi_wan = resolver.search(EntityKind::Person, &endpoint, "obi").await?;
//!
//!     println!("{}", serde_json::to_string_pretty(&obi_wan)?);
//!     println!("{}", cache.stats().await);
//!     Ok(())
//! }
//! ```
//!
//! ## Coercions
//!
//! Every coercion is total. Input that cannot be converted comes back
//! unchanged; only [`coerce::to_none`] ever produces null.
//!
//! ```rust
//! use holocron_core::coerce::{to_gravity_value, to_list, to_none, NullMarkers};
//! use serde_json::json;
//!
//! assert_eq!(to_gravity_value(json!("1.5 (surface), 1 standard (Cloud City)")),
//!            json!("1.5 (surface), 1 standard (Cloud City)"));
//! assert_eq!(to_list(json!("grasslands, mountains"), ", "),
//!            json!(["grasslands", "mountains"]));
//! assert_eq!(to_none(json!(" N/A "), &NullMarkers::default()), json!(null));
//! ```

pub mod cache;
pub mod client;
pub mod coerce;
pub mod config;
pub mod error;
pub mod resolver;
pub mod schema;
pub mod supplementary;

pub use cache::{CacheStats, CacheStore, QueryParams, ResourceCache};
pub use client::{ResourceFetcher, SwapiClient};
pub use coerce::NullMarkers;
pub use config::HolocronConfig;
pub use error::{HolocronError, Result};
pub use resolver::Resolver;
pub use schema::{CrossReference, Entity, EntityBuilder, EntityKind, MappingSpec, MappingSpecs};
pub use supplementary::{find, SupplementaryData};
