//! Static per-kind coercion tables
//!
//! Each entity kind has a fixed table from raw field name to the coercion
//! applied to it. A mapping specification may only name fields present in
//! the table of its kind.

use crate::coerce::{to_float, to_gravity_value, to_int, to_list, to_year_era};
use crate::schema::types::EntityKind;
use serde_json::Value;

/// Separator for planet and starship list fields
pub const COMMA_SEPARATOR: &str = ", ";

/// Separator for droid equipment and instructions (full-width vertical bar)
pub const FULL_WIDTH_PIPE: &str = "｜";

/// How one raw field becomes one normalized field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Coercion {
    /// Resource locator: copied verbatim, required
    Locator,
    /// Text: no conversion, null canonicalization only
    Text,
    /// Integer, see [`to_int`]
    Int,
    /// Float, see [`to_float`]
    Float,
    /// List split on the separator, see [`to_list`]
    List(&'static str),
    /// `{year, era}`, see [`to_year_era`]
    YearEra,
    /// Multiple of standard gravity, see [`to_gravity_value`]
    Gravity,
    /// Nested entity of the given kind; a list of locators uses its first one
    Reference(EntityKind),
}

impl Coercion {
    /// Apply the value conversion. `Locator`, `Text` and `Reference` leave
    /// the value untouched.
    pub fn apply(&self, value: Value) -> Value {
        match self {
            Coercion::Locator | Coercion::Text | Coercion::Reference(_) => value,
            Coercion::Int => to_int(value),
            Coercion::Float => to_float(value),
            Coercion::List(separator) => to_list(value, separator),
            Coercion::YearEra => to_year_era(value),
            Coercion::Gravity => to_gravity_value(value),
        }
    }
}

const DROID_FIELDS: &[(&str, Coercion)] = &[
    ("url", Coercion::Locator),
    ("name", Coercion::Text),
    ("model", Coercion::Text),
    ("manufacturer", Coercion::Text),
    ("create_year", Coercion::YearEra),
    ("height", Coercion::Float),
    ("mass", Coercion::Float),
    ("equipment", Coercion::List(FULL_WIDTH_PIPE)),
    ("instructions", Coercion::List(FULL_WIDTH_PIPE)),
];

const PERSON_FIELDS: &[(&str, Coercion)] = &[
    ("url", Coercion::Locator),
    ("name", Coercion::Text),
    ("birth_year", Coercion::YearEra),
    ("height", Coercion::Float),
    ("mass", Coercion::Float),
    ("homeworld", Coercion::Reference(EntityKind::Planet)),
    ("species", Coercion::Reference(EntityKind::Species)),
    ("force_sensitive", Coercion::Text),
];

const PLANET_FIELDS: &[(&str, Coercion)] = &[
    ("url", Coercion::Locator),
    ("name", Coercion::Text),
    ("region", Coercion::Text),
    ("sector", Coercion::Text),
    ("suns", Coercion::Int),
    ("moons", Coercion::Int),
    ("orbital_period", Coercion::Float),
    ("diameter", Coercion::Int),
    ("gravity", Coercion::Gravity),
    ("climate", Coercion::List(COMMA_SEPARATOR)),
    ("terrain", Coercion::List(COMMA_SEPARATOR)),
    ("population", Coercion::Int),
];

const SPECIES_FIELDS: &[(&str, Coercion)] = &[
    ("url", Coercion::Locator),
    ("name", Coercion::Text),
    ("classification", Coercion::Text),
    ("designation", Coercion::Text),
    ("average_lifespan", Coercion::Int),
    ("average_height", Coercion::Float),
    ("language", Coercion::Text),
];

const STARSHIP_FIELDS: &[(&str, Coercion)] = &[
    ("url", Coercion::Locator),
    ("name", Coercion::Text),
    ("model", Coercion::Text),
    ("starship_class", Coercion::Text),
    ("manufacturer", Coercion::Text),
    ("length", Coercion::Float),
    ("hyperdrive_rating", Coercion::Float),
    ("MGLT", Coercion::Int),
    ("max_atmosphering_speed", Coercion::Int),
    ("crew", Coercion::Int),
    ("crew_members", Coercion::List(COMMA_SEPARATOR)),
    ("passengers", Coercion::Int),
    ("passengers_on_board", Coercion::List(COMMA_SEPARATOR)),
    ("cargo_capacity", Coercion::Int),
    ("consumables", Coercion::Text),
    ("armament", Coercion::List(COMMA_SEPARATOR)),
];

impl EntityKind {
    /// The fixed coercion table of this kind
    pub fn field_table(&self) -> &'static [(&'static str, Coercion)] {
        match self {
            EntityKind::Droid => DROID_FIELDS,
            EntityKind::Person => PERSON_FIELDS,
            EntityKind::Planet => PLANET_FIELDS,
            EntityKind::Species => SPECIES_FIELDS,
            EntityKind::Starship => STARSHIP_FIELDS,
        }
    }

    /// Coercion for a raw field, or `None` when the field is unknown
    pub fn coercion_for(&self, field: &str) -> Option<Coercion> {
        self.field_table()
            .iter()
            .find(|(name, _)| *name == field)
            .map(|(_, coercion)| *coercion)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_every_kind_has_a_locator() {
        for kind in EntityKind::ALL {
            assert_eq!(kind.coercion_for("url"), Some(Coercion::Locator), "{}", kind);
        }
    }

    #[test]
    fn test_lookup() {
        assert_eq!(EntityKind::Planet.coercion_for("gravity"), Some(Coercion::Gravity));
        assert_eq!(EntityKind::Starship.coercion_for("MGLT"), Some(Coercion::Int));
        assert_eq!(EntityKind::Starship.coercion_for("mglt"), None);
        assert_eq!(
            EntityKind::Person.coercion_for("homeworld"),
            Some(Coercion::Reference(EntityKind::Planet))
        );
        assert_eq!(EntityKind::Species.coercion_for("homeworld"), None);
    }

    #[test]
    fn test_apply() {
        assert_eq!(
            Coercion::List(COMMA_SEPARATOR).apply(json!("desert, mountains")),
            json!(["desert", "mountains"])
        );
        assert_eq!(Coercion::Int.apply(json!("200000")), json!(200000));
        assert_eq!(Coercion::Text.apply(json!("12 000")), json!("12 000"));
        assert_eq!(
            Coercion::Reference(EntityKind::Species).apply(json!(["a", "b"])),
            json!(["a", "b"])
        );
    }
}
