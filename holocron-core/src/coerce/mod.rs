//! # Value coercions
//!
//! Pure functions turning raw textual API values into typed JSON values.
//!
//! Every function is total: when the input cannot be converted it is handed
//! back unchanged, never replaced by null and never turned into an error.
//! Callers that need to know whether a conversion happened compare the JSON
//! type of the result.
//!
//! ```rust
//! use holocron_core::coerce::{to_float, to_int, to_year_era};
//! use serde_json::json;
//!
//! assert_eq!(to_int(json!("506,000,000.9999")), json!(506000000));
//! assert_eq!(to_float(json!("Darth Vader")), json!("Darth Vader"));
//! assert_eq!(to_year_era(json!("19BBY")), json!({"year": 19, "era": "BBY"}));
//! ```

mod null;

pub use null::{to_none, NullMarkers, DEFAULT_NULL_MARKERS};

use regex::Regex;
use serde_json::{json, Number, Value};
use std::sync::LazyLock;

/// Separator used by [`to_list`] callers that have no field-specific one
pub const DEFAULT_LIST_SEPARATOR: &str = " ";

/// Eras recognized by [`to_year_era`]
pub const ERAS: [&str; 2] = ["BBY", "ABY"];

static NUMERIC_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[+-]?(\d+(\.\d*)?|\.\d+)$").unwrap());

static YEAR_ERA_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d+)(BBY|ABY)$").unwrap());

static DECIMAL_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\d+(\.\d+)?$").unwrap());

static STANDARD_GRAVITY_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^(\d+(?:\.\d+)?)\s?standard$").unwrap());

/// Strip thousands separators and surrounding whitespace, returning the
/// text only when what remains is a plain decimal number.
fn numeric_text(raw: &str) -> Option<String> {
    let cleaned = raw.trim().replace(',', "");
    NUMERIC_RE.is_match(&cleaned).then_some(cleaned)
}

fn float_value(f: f64) -> Option<Value> {
    Number::from_f64(f).map(Value::Number)
}

/// Convert a textual number to an integer, truncating any fractional part.
///
/// `"506,000,000.9999"` becomes `506000000`. JSON numbers are truncated the
/// same way. Anything else is returned unchanged.
pub fn to_int(value: Value) -> Value {
    match &value {
        Value::String(s) => {
            let Some(text) = numeric_text(s) else {
                return value;
            };
            let whole = text.split('.').next().unwrap_or_default();
            let whole = match whole {
                "" | "+" | "-" => "0",
                digits => digits,
            };
            match whole.parse::<i64>() {
                Ok(n) => Value::from(n),
                Err(_) => value,
            }
        }
        Value::Number(n) if n.is_i64() || n.is_u64() => value,
        Value::Number(n) => match n.as_f64() {
            Some(f) if f.is_finite() && f.abs() < i64::MAX as f64 => Value::from(f.trunc() as i64),
            _ => value,
        },
        _ => value,
    }
}

/// Convert a textual number to a float.
///
/// `"506,000,000.9999"` becomes `506000000.9999`. JSON numbers become floats.
/// Anything else is returned unchanged.
pub fn to_float(value: Value) -> Value {
    let parsed = match &value {
        Value::String(s) => numeric_text(s).and_then(|text| text.parse::<f64>().ok()),
        Value::Number(n) => n.as_f64(),
        _ => None,
    };

    parsed.and_then(float_value).unwrap_or(value)
}

/// Split a string on `separator` into trimmed tokens.
///
/// A blank string yields a single empty token. Arrays (already split
/// values), every other non-string value and an empty separator leave the
/// input unchanged.
pub fn to_list(value: Value, separator: &str) -> Value {
    match &value {
        Value::String(s) if !separator.is_empty() => Value::Array(
            s.split(separator)
                .map(|token| Value::String(token.trim().to_string()))
                .collect(),
        ),
        _ => value,
    }
}

/// Parse `<integer><era>` (for example `1032BBY`) into
/// `{"year": 1032, "era": "BBY"}`.
///
/// Only the eras in [`ERAS`] are recognized; fractional years such as
/// `41.9BBY` and any other text are returned unchanged.
pub fn to_year_era(value: Value) -> Value {
    let Value::String(s) = &value else {
        return value;
    };

    let parsed = YEAR_ERA_RE.captures(s.trim()).and_then(|caps| {
        let year = caps[1].parse::<i64>().ok()?;
        Some(json!({ "year": year, "era": &caps[2] }))
    });

    parsed.unwrap_or(value)
}

/// Parse a gravity reading into a multiple of standard gravity.
///
/// Accepts a plain decimal (`"0.98"`) or `<number> standard`
/// (`"1 standard"`, `"1standard"`, any case). Anything else is returned
/// unchanged.
pub fn to_gravity_value(value: Value) -> Value {
    let Value::String(s) = &value else {
        return value;
    };
    let text = s.trim();

    let number = if DECIMAL_RE.is_match(text) {
        Some(text)
    } else {
        STANDARD_GRAVITY_RE
            .captures(text)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str())
    };

    number
        .and_then(|n| n.parse::<f64>().ok())
        .and_then(float_value)
        .unwrap_or(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_float() {
        assert_eq!(to_float(json!("4")), json!(4.0));
        assert_eq!(to_float(json!("506,000,000.9999")), json!(506000000.9999));
        assert_eq!(to_float(json!("Darth Vader")), json!("Darth Vader"));
        assert_eq!(to_float(json!(" 1.5 ")), json!(1.5));
        assert_eq!(to_float(json!(7)), json!(7.0));
    }

    #[test]
    fn test_to_float_rejects_non_decimal_spellings() {
        assert_eq!(to_float(json!("inf")), json!("inf"));
        assert_eq!(to_float(json!("NaN")), json!("NaN"));
        assert_eq!(to_float(json!("1e5")), json!("1e5"));
        assert_eq!(to_float(Value::Null), Value::Null);
    }

    #[test]
    fn test_to_int() {
        assert_eq!(to_int(json!("506")), json!(506));
        assert_eq!(to_int(json!("506,000,000.9999")), json!(506000000));
        assert_eq!(to_int(json!("Ahsoka Tano")), json!("Ahsoka Tano"));
        assert_eq!(to_int(json!("-3.7")), json!(-3));
        assert_eq!(to_int(json!(".5")), json!(0));
        assert_eq!(to_int(json!(12.9)), json!(12));
        assert_eq!(to_int(json!(12)), json!(12));
    }

    #[test]
    fn test_to_int_keeps_zero() {
        assert_eq!(to_int(json!("0")), json!(0));
    }

    #[test]
    fn test_to_int_overflow_passes_through() {
        let huge = json!("99999999999999999999999");
        assert_eq!(to_int(huge.clone()), huge);
    }

    #[test]
    fn test_to_list() {
        assert_eq!(
            to_list(json!("Use the Force"), DEFAULT_LIST_SEPARATOR),
            json!(["Use", "the", "Force"])
        );
        assert_eq!(
            to_list(json!("X-wing|Y-wing"), "|"),
            json!(["X-wing", "Y-wing"])
        );
        assert_eq!(to_list(json!([506, 507]), ", "), json!([506, 507]));
        assert_eq!(
            to_list(json!("arid, temperate , tropical"), ", "),
            json!(["arid", "temperate", "tropical"])
        );
    }

    #[test]
    fn test_to_list_blank_input_is_one_empty_token() {
        assert_eq!(to_list(json!(""), ", "), json!([""]));
        assert_eq!(to_list(json!("   "), ", "), json!([""]));
        assert_eq!(to_list(json!("a b"), ""), json!("a b"));
    }

    #[test]
    fn test_to_list_full_width_separator() {
        assert_eq!(
            to_list(json!("Holographic projector｜Fire extinguisher"), "｜"),
            json!(["Holographic projector", "Fire extinguisher"])
        );
    }

    #[test]
    fn test_to_year_era() {
        assert_eq!(to_year_era(json!("1032BBY")), json!({"year": 1032, "era": "BBY"}));
        assert_eq!(to_year_era(json!("19BBY")), json!({"year": 19, "era": "BBY"}));
        assert_eq!(to_year_era(json!("0ABY")), json!({"year": 0, "era": "ABY"}));
        assert_eq!(to_year_era(json!("Chewbacca")), json!("Chewbacca"));
    }

    #[test]
    fn test_to_year_era_rejects_fractional_and_unknown_eras() {
        assert_eq!(to_year_era(json!("41.9BBY")), json!("41.9BBY"));
        assert_eq!(to_year_era(json!("33CE")), json!("33CE"));
        assert_eq!(to_year_era(json!(19)), json!(19));
    }

    #[test]
    fn test_to_gravity_value() {
        assert_eq!(to_gravity_value(json!("1 standard")), json!(1.0));
        assert_eq!(to_gravity_value(json!("0.98")), json!(0.98));
        assert_eq!(to_gravity_value(json!("N/A")), json!("N/A"));
        assert_eq!(to_gravity_value(json!("5STANDARD")), json!(5.0));
        assert_eq!(to_gravity_value(json!("1.5 Standard")), json!(1.5));
    }

    #[test]
    fn test_to_gravity_value_rejects_compound_readings() {
        let compound = json!("1.1 standard, 0.9 standard");
        assert_eq!(to_gravity_value(compound.clone()), compound);
    }
}
