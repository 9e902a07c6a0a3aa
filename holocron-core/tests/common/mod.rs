//! Shared fixtures: an in-memory fetcher serving canned SWAPI records

#![allow(dead_code)]

use async_trait::async_trait;
use holocron_core::cache::{cache_key, CacheValue, QueryParams};
use holocron_core::{HolocronError, ResourceFetcher, Result};
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

pub const API: &str = "https://swapi.test/api";

/// Serves fixed responses by cache key and counts remote calls
#[derive(Clone, Default)]
pub struct FakeSwapi {
    responses: Arc<HashMap<String, Value>>,
    calls: Arc<AtomicUsize>,
}

impl FakeSwapi {
    pub fn new() -> Self {
        let mut responses = HashMap::new();

        responses.insert(
            format!("{API}/people/10/"),
            json!({
                "name": "Obi-Wan Kenobi",
                "height": "182",
                "mass": "77",
                "birth_year": "57BBY",
                "homeworld": format!("{API}/planets/20/"),
                "species": [format!("{API}/species/1/")],
                "url": format!("{API}/people/10/")
            }),
        );
        responses.insert(
            format!("{API}/planets/20/"),
            json!({
                "name": "Stewjon",
                "orbital_period": "unknown",
                "diameter": "0",
                "climate": "temperate",
                "gravity": "1 standard",
                "terrain": "grass",
                "population": "unknown",
                "url": format!("{API}/planets/20/")
            }),
        );
        responses.insert(
            format!("{API}/species/1/"),
            json!({
                "name": "Human",
                "classification": "mammal",
                "designation": "sentient",
                "average_height": "180",
                "average_lifespan": "120",
                "language": "Galactic Basic",
                "url": format!("{API}/species/1/")
            }),
        );

        let obi_wan = responses[&format!("{API}/people/10/")].clone();
        let mut search = QueryParams::new();
        search.insert("search".to_string(), "obi".to_string());
        responses.insert(
            cache_key(&format!("{API}/people/"), Some(&search)),
            json!({"count": 1, "next": null, "previous": null, "results": [obi_wan]}),
        );

        let mut nothing = QueryParams::new();
        nothing.insert("search".to_string(), "jar jar".to_string());
        responses.insert(
            cache_key(&format!("{API}/people/"), Some(&nothing)),
            json!({"count": 0, "next": null, "previous": null, "results": []}),
        );

        Self {
            responses: Arc::new(responses),
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ResourceFetcher for FakeSwapi {
    async fn get(
        &self,
        locator: &str,
        params: Option<&QueryParams>,
        _timeout: Duration,
    ) -> Result<CacheValue> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.responses
            .get(&cache_key(locator, params))
            .cloned()
            .ok_or_else(|| HolocronError::Status {
                locator: locator.to_string(),
                status: 404,
            })
    }
}
