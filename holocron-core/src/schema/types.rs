//! Type definitions for normalized entities

use crate::error::HolocronError;
use serde::{Deserialize, Serialize, Serializer};
use serde_json::{Map, Value};
use std::fmt;
use std::str::FromStr;

/// Entity kinds the builder knows how to normalize
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityKind {
    /// Droid (served from the `people` collection)
    Droid,
    /// Person
    Person,
    /// Planet
    Planet,
    /// Species
    Species,
    /// Starship
    Starship,
}

impl EntityKind {
    /// Every kind, in mapping-table order
    pub const ALL: [EntityKind; 5] = [
        EntityKind::Droid,
        EntityKind::Person,
        EntityKind::Planet,
        EntityKind::Species,
        EntityKind::Starship,
    ];

    /// Name used in mapping specifications and error messages
    pub fn as_str(&self) -> &'static str {
        match self {
            EntityKind::Droid => "droid",
            EntityKind::Person => "person",
            EntityKind::Planet => "planet",
            EntityKind::Species => "species",
            EntityKind::Starship => "starship",
        }
    }

    /// Collection path segment on the resource API
    pub fn collection(&self) -> &'static str {
        match self {
            EntityKind::Droid | EntityKind::Person => "people",
            EntityKind::Planet => "planets",
            EntityKind::Species => "species",
            EntityKind::Starship => "starships",
        }
    }

    /// Collection locator under `api_base`, with trailing slash
    pub fn endpoint(&self, api_base: &str) -> String {
        format!("{}/{}/", api_base.trim_end_matches('/'), self.collection())
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EntityKind {
    type Err = HolocronError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "droid" | "droids" => Ok(EntityKind::Droid),
            "person" | "people" => Ok(EntityKind::Person),
            "planet" | "planets" => Ok(EntityKind::Planet),
            "species" => Ok(EntityKind::Species),
            "starship" | "starships" => Ok(EntityKind::Starship),
            other => Err(HolocronError::Config(format!("unknown entity kind '{}'", other))),
        }
    }
}

/// A field whose value is another entity, still to be fetched and built
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CrossReference {
    /// Target field name in the owning entity
    pub target: String,
    /// Kind of the referenced entity
    pub kind: EntityKind,
    /// Locator of the referenced resource
    pub locator: String,
}

/// Normalized entity: exactly the target fields of a mapping specification
///
/// Serializes as the plain field map, in mapping order.
#[derive(Debug, Clone, PartialEq)]
pub struct Entity {
    kind: EntityKind,
    fields: Map<String, Value>,
    references: Vec<CrossReference>,
}

impl Entity {
    pub(crate) fn new(
        kind: EntityKind,
        fields: Map<String, Value>,
        references: Vec<CrossReference>,
    ) -> Self {
        Self {
            kind,
            fields,
            references,
        }
    }

    /// Kind of this entity
    pub fn kind(&self) -> EntityKind {
        self.kind
    }

    /// Normalized fields in mapping order
    pub fn fields(&self) -> &Map<String, Value> {
        &self.fields
    }

    /// Value of a target field
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.fields.get(field)
    }

    /// The entity's resource locator, when mapped under `url`
    pub fn url(&self) -> Option<&str> {
        self.fields.get("url").and_then(Value::as_str)
    }

    /// Cross references not yet replaced by nested entities
    pub fn references(&self) -> &[CrossReference] {
        &self.references
    }

    /// True once every cross reference has been inlined
    pub fn is_resolved(&self) -> bool {
        self.references.is_empty()
    }

    /// Replace the placeholder locator of `target` with a nested entity
    pub fn inline(&mut self, target: &str, nested: Entity) {
        self.references.retain(|r| r.target != target);
        self.fields.insert(target.to_string(), nested.into_value());
    }

    /// Take the pending cross references, leaving none behind
    pub(crate) fn take_references(&mut self) -> Vec<CrossReference> {
        std::mem::take(&mut self.references)
    }

    /// Convert into a plain JSON object
    pub fn into_value(self) -> Value {
        Value::Object(self.fields)
    }
}

impl Serialize for Entity {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.fields.serialize(serializer)
    }
}
