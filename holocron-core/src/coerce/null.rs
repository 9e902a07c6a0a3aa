//! Null canonicalization
//!
//! Only strings can become null, and only by matching a marker after trimming
//! and lowercasing. Numbers, booleans and arrays keep their value even when
//! they are zero or empty.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Markers treated as "no value" unless configured otherwise
pub const DEFAULT_NULL_MARKERS: [&str; 4] = ["", "n/a", "none", "unknown"];

/// Configured set of empty-value markers
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<String>", into = "Vec<String>")]
pub struct NullMarkers {
    markers: Vec<String>,
}

impl NullMarkers {
    /// Create a marker set; markers are matched trimmed and case-insensitively
    pub fn new<I, S>(markers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut normalized: Vec<String> = Vec::new();
        for marker in markers {
            let marker = marker.as_ref().trim().to_lowercase();
            if !normalized.contains(&marker) {
                normalized.push(marker);
            }
        }
        Self {
            markers: normalized,
        }
    }

    /// Check whether `text` is one of the markers
    pub fn is_marker(&self, text: &str) -> bool {
        let text = text.trim().to_lowercase();
        self.markers.iter().any(|m| *m == text)
    }

    /// The normalized markers in configuration order
    pub fn as_slice(&self) -> &[String] {
        &self.markers
    }
}

impl Default for NullMarkers {
    fn default() -> Self {
        Self::new(DEFAULT_NULL_MARKERS)
    }
}

impl From<Vec<String>> for NullMarkers {
    fn from(markers: Vec<String>) -> Self {
        Self::new(markers)
    }
}

impl From<NullMarkers> for Vec<String> {
    fn from(markers: NullMarkers) -> Self {
        markers.markers
    }
}

/// Replace a marker string with `Null`; every other value is returned unchanged
pub fn to_none(value: Value, markers: &NullMarkers) -> Value {
    match &value {
        Value::String(s) if markers.is_marker(s) => Value::Null,
        _ => value,
    }
}
