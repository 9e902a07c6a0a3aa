//! Entity builder: raw record (+ supplementary overlay) to normalized entity

use crate::coerce::{to_none, NullMarkers};
use crate::error::{HolocronError, Result};
use crate::schema::coercion::Coercion;
use crate::schema::mapping::{FieldPlan, MappingSpecs};
use crate::schema::types::{CrossReference, Entity, EntityKind};
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use tracing::debug;

/// Builds normalized entities from raw records
///
/// For each field of the kind's mapping specification, in order:
///
/// 1. `url` is copied verbatim and must be present
/// 2. cross references (person `homeworld`, `species`) keep their locator as
///    a placeholder and are recorded on the entity for the resolver
/// 3. everything else is coerced, then canonicalized
///
/// Coercions are resolved once, when the builder is created.
#[derive(Debug, Clone)]
pub struct EntityBuilder {
    specs: MappingSpecs,
    plans: BTreeMap<EntityKind, FieldPlan>,
    markers: NullMarkers,
}

impl Default for EntityBuilder {
    fn default() -> Self {
        Self::new(MappingSpecs::default(), NullMarkers::default())
            .expect("stock mapping specifications match the coercion tables")
    }
}

impl EntityBuilder {
    /// Create a builder, rejecting specifications that name unknown fields
    pub fn new(specs: MappingSpecs, markers: NullMarkers) -> Result<Self> {
        let mut plans = BTreeMap::new();
        for (kind, spec) in specs.iter() {
            plans.insert(kind, spec.plan(kind)?);
        }

        Ok(Self {
            specs,
            plans,
            markers,
        })
    }

    pub fn specs(&self) -> &MappingSpecs {
        &self.specs
    }

    pub fn markers(&self) -> &NullMarkers {
        &self.markers
    }

    /// Build one entity. `supplementary` fields overwrite `raw` fields on a
    /// working copy; `raw` itself is never modified.
    pub fn build(&self, kind: EntityKind, raw: &Value, supplementary: Option<&Value>) -> Result<Entity> {
        let plan = self.plan_for(kind)?;
        let record = overlay(kind, raw, supplementary)?;

        let mut fields = Map::new();
        let mut references = Vec::new();

        for (mapping, coercion) in plan {
            let value = match *coercion {
                Coercion::Locator => record
                    .get(&mapping.source)
                    .cloned()
                    .ok_or_else(|| HolocronError::missing_field(kind, mapping.source.clone()))?,
                Coercion::Reference(target_kind) => {
                    match self.reference_locator(record.get(&mapping.source)) {
                        Some(locator) => {
                            references.push(CrossReference {
                                target: mapping.target.clone(),
                                kind: target_kind,
                                locator: locator.clone(),
                            });
                            Value::String(locator)
                        }
                        None => Value::Null,
                    }
                }
                other => {
                    let raw_value = record.get(&mapping.source).cloned().unwrap_or(Value::Null);
                    to_none(other.apply(raw_value), &self.markers)
                }
            };

            fields.insert(mapping.target.clone(), value);
        }

        debug!(
            "Built {} with {} fields and {} pending references",
            kind,
            fields.len(),
            references.len()
        );

        Ok(Entity::new(kind, fields, references))
    }

    /// Build every record, failing on the first error
    pub fn build_many(&self, kind: EntityKind, raws: &[Value]) -> Result<Vec<Entity>> {
        raws.iter().map(|raw| self.build(kind, raw, None)).collect()
    }

    fn plan_for(&self, kind: EntityKind) -> Result<&FieldPlan> {
        self.plans
            .get(&kind)
            .ok_or_else(|| HolocronError::Config(format!("no mapping specification for {}", kind)))
    }

    /// First usable locator of a reference field
    fn reference_locator(&self, value: Option<&Value>) -> Option<String> {
        let candidate = match value? {
            Value::Array(items) => items.first()?,
            other => other,
        };

        match to_none(candidate.clone(), &self.markers) {
            Value::String(locator) => Some(locator),
            _ => None,
        }
    }
}

fn overlay(kind: EntityKind, raw: &Value, supplementary: Option<&Value>) -> Result<Map<String, Value>> {
    let mut record = match raw {
        Value::Object(map) => map.clone(),
        other => {
            return Err(HolocronError::Serialization(format!(
                "raw {} record must be a JSON object, got {}",
                kind,
                type_name(other)
            )))
        }
    };

    match supplementary {
        None | Some(Value::Null) => {}
        Some(Value::Object(extra)) => {
            for (field, value) in extra {
                record.insert(field.clone(), value.clone());
            }
        }
        Some(other) => {
            return Err(HolocronError::Serialization(format!(
                "supplementary {} record must be a JSON object, got {}",
                kind,
                type_name(other)
            )))
        }
    }

    Ok(record)
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
