//! Cross-reference resolution
//!
//! A person's homeworld and species are other resources. The builder leaves
//! their locators behind as placeholders; the [`Resolver`] fetches each one
//! through the cache, runs it through the same overlay-and-build pipeline
//! and inlines the result.

use crate::cache::ResourceCache;
use crate::client::ResourceFetcher;
use crate::error::Result;
use crate::schema::{Entity, EntityBuilder, EntityKind};
use crate::supplementary::SupplementaryData;
use futures::future::BoxFuture;
use serde_json::Value;
use tracing::{debug, info};

/// Fetches, overlays, builds and resolves entities
pub struct Resolver<'a, F> {
    cache: &'a ResourceCache<F>,
    builder: &'a EntityBuilder,
    supplementary: &'a SupplementaryData,
}

impl<'a, F: ResourceFetcher> Resolver<'a, F> {
    pub fn new(
        cache: &'a ResourceCache<F>,
        builder: &'a EntityBuilder,
        supplementary: &'a SupplementaryData,
    ) -> Self {
        Self {
            cache,
            builder,
            supplementary,
        }
    }

    /// Fully resolved entity for the resource at `locator`
    pub async fn entity(&self, kind: EntityKind, locator: &str) -> Result<Entity> {
        info!("Resolving {} at {}", kind, locator);
        let raw = self.cache.fetch(locator, None).await?;
        self.normalize(kind, raw).await
    }

    /// Fully resolved entity for the first search match of `term` under the
    /// collection at `locator`
    pub async fn search(&self, kind: EntityKind, locator: &str, term: &str) -> Result<Entity> {
        info!("Searching {} for '{}' at {}", kind, term, locator);
        let raw = self.cache.search(locator, term).await?;
        self.normalize(kind, raw).await
    }

    /// Build from an already fetched record with a caller-chosen overlay,
    /// then resolve its references
    pub async fn from_raw(
        &self,
        kind: EntityKind,
        raw: &Value,
        supplementary: Option<&Value>,
    ) -> Result<Entity> {
        let entity = self.builder.build(kind, raw, supplementary)?;
        self.resolve(entity).await
    }

    /// Planet at `locator`
    pub async fn homeworld(&self, locator: &str) -> Result<Entity> {
        self.entity(EntityKind::Planet, locator).await
    }

    /// Species at `locator`
    pub async fn species(&self, locator: &str) -> Result<Entity> {
        self.entity(EntityKind::Species, locator).await
    }

    async fn normalize(&self, kind: EntityKind, raw: Value) -> Result<Entity> {
        let overlay = self.supplementary.lookup(kind, &raw);
        if overlay.is_some() {
            debug!("Found supplementary {} record", kind);
        }
        self.from_raw(kind, &raw, overlay).await
    }

    fn resolve(&self, mut entity: Entity) -> BoxFuture<'_, Result<Entity>> {
        Box::pin(async move {
            for reference in entity.take_references() {
                debug!(
                    "Resolving {} reference '{}' -> {}",
                    reference.kind, reference.target, reference.locator
                );
                let nested = self.entity(reference.kind, &reference.locator).await?;
                entity.inline(&reference.target, nested);
            }
            Ok(entity)
        })
    }
}
