//! Integration tests for entity resolution through the cache

mod common;

use common::{FakeSwapi, API};
use holocron_core::cache::{CacheStore, ResourceCache};
use holocron_core::{EntityBuilder, EntityKind, HolocronError, Resolver, SupplementaryData};
use serde_json::{json, Value};
use std::time::Duration;
use tempfile::TempDir;

fn cache_in(tmp: &TempDir, fetcher: FakeSwapi) -> ResourceCache<FakeSwapi> {
    let store = CacheStore::open(tmp.path().join("CACHE.json")).unwrap();
    ResourceCache::new(store, fetcher, Duration::from_secs(5))
}

fn supplementary() -> SupplementaryData {
    SupplementaryData::new()
        .with_dataset(
            EntityKind::Person,
            vec![json!({"name": "Obi-Wan Kenobi", "force_sensitive": "True"})],
        )
        .with_dataset(
            EntityKind::Planet,
            vec![json!({"name": "Stewjon", "region": "Outer Rim Territories", "sector": "unknown", "suns": "1", "moons": "1"})],
        )
}

#[tokio::test]
async fn test_person_resolves_nested_homeworld_and_species() {
    let tmp = TempDir::new().unwrap();
    let fetcher = FakeSwapi::new();
    let cache = cache_in(&tmp, fetcher.clone());
    let builder = EntityBuilder::default();
    let supplementary = supplementary();
    let resolver = Resolver::new(&cache, &builder, &supplementary);

    let person = resolver
        .entity(EntityKind::Person, &format!("{API}/people/10/"))
        .await
        .unwrap();

    assert!(person.is_resolved());
    assert_eq!(person.get("name"), Some(&json!("Obi-Wan Kenobi")));
    assert_eq!(person.get("birth_date"), Some(&json!({"year": 57, "era": "BBY"})));
    assert_eq!(person.get("force_sensitive"), Some(&json!("True")));

    let homeworld = person.get("homeworld").unwrap();
    assert_eq!(homeworld["name"], "Stewjon");
    assert_eq!(homeworld["region"], "Outer Rim Territories");
    assert_eq!(homeworld["sector"], Value::Null);
    assert_eq!(homeworld["suns"], 1);
    assert_eq!(homeworld["population"], Value::Null);
    assert_eq!(homeworld["diameter_km"], 0);
    assert_eq!(homeworld["gravity_std"], 1.0);

    let species = person.get("species").unwrap();
    assert_eq!(species["name"], "Human");
    assert_eq!(species["average_lifespan_yrs"], 120);

    assert_eq!(fetcher.calls(), 3);
    assert_eq!(cache.len().await, 3);
}

#[tokio::test]
async fn test_second_resolution_is_served_from_cache() {
    let tmp = TempDir::new().unwrap();
    let fetcher = FakeSwapi::new();
    let cache = cache_in(&tmp, fetcher.clone());
    let builder = EntityBuilder::default();
    let supplementary = supplementary();
    let resolver = Resolver::new(&cache, &builder, &supplementary);
    let locator = format!("{API}/people/10/");

    let first = resolver.entity(EntityKind::Person, &locator).await.unwrap();
    let second = resolver.entity(EntityKind::Person, &locator).await.unwrap();

    assert_eq!(first, second);
    assert_eq!(fetcher.calls(), 3);
}

#[tokio::test]
async fn test_search_then_resolve() {
    let tmp = TempDir::new().unwrap();
    let cache = cache_in(&tmp, FakeSwapi::new());
    let builder = EntityBuilder::default();
    let supplementary = SupplementaryData::new();
    let resolver = Resolver::new(&cache, &builder, &supplementary);

    let person = resolver
        .search(EntityKind::Person, &EntityKind::Person.endpoint(API), "obi")
        .await
        .unwrap();

    assert_eq!(person.url(), Some(format!("{API}/people/10/").as_str()));
    assert_eq!(person.get("force_sensitive"), Some(&Value::Null));
    assert_eq!(person.get("homeworld").unwrap()["region"], Value::Null);
}

#[tokio::test]
async fn test_from_raw_uses_given_overlay() {
    let tmp = TempDir::new().unwrap();
    let cache = cache_in(&tmp, FakeSwapi::new());
    let builder = EntityBuilder::default();
    let supplementary = supplementary();
    let resolver = Resolver::new(&cache, &builder, &supplementary);

    let raw = cache.fetch(&format!("{API}/people/10/"), None).await.unwrap();
    let person = resolver
        .from_raw(EntityKind::Person, &raw, Some(&json!({"name": "Ben Kenobi"})))
        .await
        .unwrap();

    assert_eq!(person.get("name"), Some(&json!("Ben Kenobi")));
    assert_eq!(person.get("force_sensitive"), Some(&Value::Null));
    assert_eq!(raw["name"], "Obi-Wan Kenobi");
}

#[tokio::test]
async fn test_nested_builders() {
    let tmp = TempDir::new().unwrap();
    let cache = cache_in(&tmp, FakeSwapi::new());
    let builder = EntityBuilder::default();
    let supplementary = SupplementaryData::new();
    let resolver = Resolver::new(&cache, &builder, &supplementary);

    let planet = resolver.homeworld(&format!("{API}/planets/20/")).await.unwrap();
    assert_eq!(planet.kind(), EntityKind::Planet);
    assert_eq!(planet.get("terrain"), Some(&json!(["grass"])));

    let species = resolver.species(&format!("{API}/species/1/")).await.unwrap();
    assert_eq!(species.get("average_height_cm"), Some(&json!(180.0)));
}

#[tokio::test]
async fn test_missing_reference_fails_whole_entity() {
    let tmp = TempDir::new().unwrap();
    let cache = cache_in(&tmp, FakeSwapi::new());
    let builder = EntityBuilder::default();
    let supplementary = SupplementaryData::new();
    let resolver = Resolver::new(&cache, &builder, &supplementary);

    let raw = json!({
        "name": "Nobody",
        "homeworld": format!("{API}/planets/404/"),
        "species": [],
        "url": format!("{API}/people/404/")
    });

    let err = resolver.from_raw(EntityKind::Person, &raw, None).await.unwrap_err();
    assert!(matches!(err, HolocronError::Status { status: 404, .. }));
}
