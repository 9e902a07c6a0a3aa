//! Mapping specifications: ordered raw-to-target field renames per kind

use crate::error::{HolocronError, Result};
use crate::schema::coercion::Coercion;
use crate::schema::types::EntityKind;
use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::{BTreeMap, HashSet};
use std::fmt;

/// One raw field and the name it takes in the normalized entity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldMapping {
    pub source: String,
    pub target: String,
}

/// A specification's mappings paired with their coercions, in order
pub type FieldPlan = Vec<(FieldMapping, Coercion)>;

/// Ordered mapping from raw field names to target field names
///
/// Order is significant: normalized entities list their fields in it.
/// (De)serializes as a plain object, `{"raw_name": "target_name", ...}`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MappingSpec {
    fields: Vec<FieldMapping>,
}

impl MappingSpec {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a mapping; a repeated source replaces its earlier target in place
    pub fn field(mut self, source: impl Into<String>, target: impl Into<String>) -> Self {
        self.push(source.into(), target.into());
        self
    }

    fn push(&mut self, source: String, target: String) {
        match self.fields.iter_mut().find(|m| m.source == source) {
            Some(existing) => existing.target = target,
            None => self.fields.push(FieldMapping { source, target }),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &FieldMapping> {
        self.fields.iter()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Target name of a raw field
    pub fn target_of(&self, source: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|m| m.source == source)
            .map(|m| m.target.as_str())
    }

    /// Look up the coercion of every source in the table of `kind`.
    /// Unknown sources and duplicate target names are rejected.
    pub fn plan(&self, kind: EntityKind) -> Result<FieldPlan> {
        let mut targets = HashSet::new();
        let mut plan = Vec::with_capacity(self.fields.len());

        for mapping in &self.fields {
            let coercion = kind
                .coercion_for(&mapping.source)
                .ok_or_else(|| HolocronError::unknown_field(kind, mapping.source.clone()))?;
            if !targets.insert(mapping.target.as_str()) {
                return Err(HolocronError::Config(format!(
                    "{} mapping assigns target '{}' more than once",
                    kind, mapping.target
                )));
            }
            plan.push((mapping.clone(), coercion));
        }

        Ok(plan)
    }

    pub fn validate(&self, kind: EntityKind) -> Result<()> {
        self.plan(kind).map(|_| ())
    }
}

impl<S: Into<String>, T: Into<String>> FromIterator<(S, T)> for MappingSpec {
    fn from_iter<I: IntoIterator<Item = (S, T)>>(iter: I) -> Self {
        let mut spec = MappingSpec::new();
        for (source, target) in iter {
            spec.push(source.into(), target.into());
        }
        spec
    }
}

impl Serialize for MappingSpec {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.fields.len()))?;
        for mapping in &self.fields {
            map.serialize_entry(&mapping.source, &mapping.target)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for MappingSpec {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        struct SpecVisitor;

        impl<'de> Visitor<'de> for SpecVisitor {
            type Value = MappingSpec;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a map of raw field names to target field names")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> std::result::Result<MappingSpec, A::Error> {
                let mut spec = MappingSpec::new();
                while let Some((source, target)) = access.next_entry::<String, String>()? {
                    spec.push(source, target);
                }
                Ok(spec)
            }
        }

        deserializer.deserialize_map(SpecVisitor)
    }
}

/// Mapping specifications for every kind
///
/// `Default` holds the stock renames; a mapping file can override
/// individual kinds with [`MappingSpecs::merge`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MappingSpecs {
    specs: BTreeMap<EntityKind, MappingSpec>,
}

impl MappingSpecs {
    /// No specifications at all
    pub fn empty() -> Self {
        Self {
            specs: BTreeMap::new(),
        }
    }

    pub fn get(&self, kind: EntityKind) -> Option<&MappingSpec> {
        self.specs.get(&kind)
    }

    pub fn insert(&mut self, kind: EntityKind, spec: MappingSpec) {
        self.specs.insert(kind, spec);
    }

    /// Replace the specifications of every kind present in `overrides`
    pub fn merge(mut self, overrides: MappingSpecs) -> Self {
        self.specs.extend(overrides.specs);
        self
    }

    pub fn kinds(&self) -> impl Iterator<Item = EntityKind> + '_ {
        self.specs.keys().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (EntityKind, &MappingSpec)> {
        self.specs.iter().map(|(kind, spec)| (*kind, spec))
    }

    /// Validate every specification against its coercion table
    pub fn validate(&self) -> Result<()> {
        for (kind, spec) in &self.specs {
            spec.validate(*kind)?;
        }
        Ok(())
    }
}

impl Default for MappingSpecs {
    fn default() -> Self {
        let mut specs = BTreeMap::new();

        specs.insert(
            EntityKind::Droid,
            MappingSpec::from_iter([
                ("url", "url"),
                ("name", "name"),
                ("model", "model"),
                ("manufacturer", "manufacturer"),
                ("create_year", "create_date"),
                ("height", "height_cm"),
                ("mass", "mass_kg"),
                ("equipment", "equipment"),
                ("instructions", "instructions"),
            ]),
        );
        specs.insert(
            EntityKind::Person,
            MappingSpec::from_iter([
                ("url", "url"),
                ("name", "name"),
                ("birth_year", "birth_date"),
                ("height", "height_cm"),
                ("mass", "mass_kg"),
                ("homeworld", "homeworld"),
                ("species", "species"),
                ("force_sensitive", "force_sensitive"),
            ]),
        );
        specs.insert(
            EntityKind::Planet,
            MappingSpec::from_iter([
                ("url", "url"),
                ("name", "name"),
                ("region", "region"),
                ("sector", "sector"),
                ("suns", "suns"),
                ("moons", "moons"),
                ("orbital_period", "orbital_period_days"),
                ("diameter", "diameter_km"),
                ("gravity", "gravity_std"),
                ("climate", "climate"),
                ("terrain", "terrain"),
                ("population", "population"),
            ]),
        );
        specs.insert(
            EntityKind::Species,
            MappingSpec::from_iter([
                ("url", "url"),
                ("name", "name"),
                ("classification", "classification"),
                ("designation", "designation"),
                ("average_lifespan", "average_lifespan_yrs"),
                ("average_height", "average_height_cm"),
                ("language", "language"),
            ]),
        );
        specs.insert(
            EntityKind::Starship,
            MappingSpec::from_iter([
                ("url", "url"),
                ("name", "name"),
                ("model", "model"),
                ("starship_class", "starship_class"),
                ("manufacturer", "manufacturer"),
                ("length", "length_m"),
                ("hyperdrive_rating", "hyperdrive_rating"),
                ("MGLT", "max_megalight_hr"),
                ("max_atmosphering_speed", "max_atmosphering_speed_kph"),
                ("crew", "crew_size"),
                ("crew_members", "crew_members"),
                ("passengers", "max_passengers"),
                ("passengers_on_board", "passengers_on_board"),
                ("cargo_capacity", "cargo_capacity_kg"),
                ("consumables", "consumables"),
                ("armament", "armament"),
            ]),
        );

        Self { specs }
    }
}
