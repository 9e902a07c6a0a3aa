//! Supplementary datasets
//!
//! Records from a secondary source, matched to raw API records by an exact
//! field comparison and overlaid on them before normalization.

use crate::schema::EntityKind;
use serde_json::Value;
use std::collections::HashMap;
use tracing::debug;

/// Field used to match supplementary records unless told otherwise
pub const DEFAULT_LOOKUP_KEY: &str = "name";

/// First record whose `key` field equals `value`.
///
/// Comparison is JSON equality, so strings match case-sensitively and
/// `"1"` never matches `1`. An absent or empty dataset has no match.
pub fn find<'a>(dataset: Option<&'a [Value]>, key: &str, value: &Value) -> Option<&'a Value> {
    dataset?
        .iter()
        .find(|record| record.get(key) == Some(value))
}

#[derive(Debug, Clone)]
struct Dataset {
    key: String,
    records: Vec<Value>,
}

/// Supplementary datasets by entity kind
#[derive(Debug, Clone, Default)]
pub struct SupplementaryData {
    datasets: HashMap<EntityKind, Dataset>,
}

impl SupplementaryData {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register records for `kind`, matched on [`DEFAULT_LOOKUP_KEY`]
    pub fn with_dataset(self, kind: EntityKind, records: Vec<Value>) -> Self {
        self.with_keyed_dataset(kind, DEFAULT_LOOKUP_KEY, records)
    }

    /// Register records for `kind`, matched on `key`
    pub fn with_keyed_dataset(mut self, kind: EntityKind, key: impl Into<String>, records: Vec<Value>) -> Self {
        self.insert(kind, key, records);
        self
    }

    /// Register (or replace) the dataset of `kind`
    pub fn insert(&mut self, kind: EntityKind, key: impl Into<String>, records: Vec<Value>) {
        let key = key.into();
        debug!("Registered {} supplementary {} records keyed on '{}'", records.len(), kind, key);
        self.datasets.insert(kind, Dataset { key, records });
    }

    /// Records registered for `kind`
    pub fn dataset(&self, kind: EntityKind) -> Option<&[Value]> {
        self.datasets.get(&kind).map(|d| d.records.as_slice())
    }

    /// Lookup key of the dataset registered for `kind`
    pub fn lookup_key(&self, kind: EntityKind) -> Option<&str> {
        self.datasets.get(&kind).map(|d| d.key.as_str())
    }

    /// Supplementary record for a raw record of `kind`, matched on the
    /// dataset's lookup key
    pub fn lookup(&self, kind: EntityKind, raw: &Value) -> Option<&Value> {
        let dataset = self.datasets.get(&kind)?;
        let value = raw.get(&dataset.key)?;
        find(Some(dataset.records.as_slice()), &dataset.key, value)
    }

    pub fn is_empty(&self) -> bool {
        self.datasets.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn planets() -> Vec<Value> {
        vec![
            json!({"name": "Tatooine", "region": "Outer Rim Territories", "suns": "2"}),
            json!({"name": "Alderaan", "region": "Core Worlds"}),
            json!({"name": "Tatooine", "region": "duplicate"}),
        ]
    }

    #[test]
    fn test_find_first_match() {
        let records = planets();
        let found = find(Some(records.as_slice()), "name", &json!("Tatooine")).unwrap();
        assert_eq!(found["region"], json!("Outer Rim Territories"));
    }

    #[test]
    fn test_find_is_case_sensitive() {
        let records = planets();
        assert!(find(Some(records.as_slice()), "name", &json!("tatooine")).is_none());
    }

    #[test]
    fn test_find_without_dataset() {
        assert!(find(None, "name", &json!("Tatooine")).is_none());
        assert!(find(Some(&[][..]), "name", &json!("Tatooine")).is_none());
    }

    #[test]
    fn test_find_compares_json_types() {
        let records = vec![json!({"id": "1"}), json!({"id": 1})];
        assert_eq!(find(Some(records.as_slice()), "id", &json!(1)), Some(&records[1]));
    }

    #[test]
    fn test_lookup_by_kind() {
        let data = SupplementaryData::new()
            .with_dataset(EntityKind::Planet, planets())
            .with_keyed_dataset(EntityKind::Species, "url", vec![json!({"url": "u/3/", "language": "Shyriiwook"})]);

        let tatooine = json!({"name": "Tatooine", "url": "u/1/"});
        assert_eq!(
            data.lookup(EntityKind::Planet, &tatooine).unwrap()["suns"],
            json!("2")
        );
        assert!(data.lookup(EntityKind::Starship, &tatooine).is_none());

        let wookiee = json!({"name": "Wookie", "url": "u/3/"});
        assert_eq!(
            data.lookup(EntityKind::Species, &wookiee).unwrap()["language"],
            json!("Shyriiwook")
        );
        assert_eq!(data.lookup_key(EntityKind::Species), Some("url"));
    }

    #[test]
    fn test_lookup_without_key_field() {
        let data = SupplementaryData::new().with_dataset(EntityKind::Planet, planets());
        assert!(data.lookup(EntityKind::Planet, &json!({"url": "u/1/"})).is_none());
    }
}
