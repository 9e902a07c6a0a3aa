//! Entity schema module
//!
//! Entity kinds, their fixed coercion tables, the configurable mapping
//! specifications and the builder that turns raw records into normalized
//! entities.

pub mod builder;
pub mod coercion;
pub mod mapping;
pub mod types;

pub use builder::EntityBuilder;
pub use coercion::{Coercion, COMMA_SEPARATOR, FULL_WIDTH_PIPE};
pub use mapping::{FieldMapping, MappingSpec, MappingSpecs};
pub use types::{CrossReference, Entity, EntityKind};
