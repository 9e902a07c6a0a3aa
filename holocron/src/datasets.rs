//! Supplementary dataset files
//!
//! A dataset is a list of JSON objects. `.csv` files use their header row as
//! field names and keep every cell as a string; anything else is read as a
//! JSON array.

use anyhow::{bail, Context, Result};
use serde_json::{Map, Value};
use std::fs;
use std::io::Read;
use std::path::Path;
use tracing::info;

/// Load a dataset, choosing the format by file extension
pub fn load_dataset(path: &Path) -> Result<Vec<Value>> {
    let is_csv = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("csv"));

    let records = if is_csv {
        let file = fs::File::open(path)
            .with_context(|| format!("Failed to open dataset {:?}", path))?;
        parse_csv(file).with_context(|| format!("Failed to parse CSV dataset {:?}", path))?
    } else {
        let text = fs::read_to_string(path)
            .with_context(|| format!("Failed to read dataset {:?}", path))?;
        parse_json(&text).with_context(|| format!("Failed to parse JSON dataset {:?}", path))?
    };

    info!("Loaded {} records from {:?}", records.len(), path);
    Ok(records)
}

/// Parse CSV with a header row into one object per row
pub fn parse_csv(input: impl Read) -> Result<Vec<Value>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::None)
        .from_reader(input);

    let headers: Vec<String> = reader.headers()?.iter().map(String::from).collect();

    let mut records = Vec::new();
    for row in reader.records() {
        let row = row?;
        let mut record = Map::new();
        for (header, cell) in headers.iter().zip(row.iter()) {
            record.insert(header.clone(), Value::String(cell.to_string()));
        }
        records.push(Value::Object(record));
    }

    Ok(records)
}

/// Parse a JSON array of objects
pub fn parse_json(text: &str) -> Result<Vec<Value>> {
    let value: Value = serde_json::from_str(text)?;

    let Value::Array(records) = value else {
        bail!("expected a JSON array of records");
    };

    if let Some(position) = records.iter().position(|r| !r.is_object()) {
        bail!("record {} is not a JSON object", position);
    }

    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_csv_keeps_strings() {
        let input = "name,model,equipment\nR2-D2,R2 series,scomp link｜periscope\nC-3PO,3PO series,\n";
        let records = parse_csv(input.as_bytes()).unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(records[0]["equipment"], json!("scomp link｜periscope"));
        assert_eq!(records[1]["equipment"], json!(""));
        assert_eq!(records[1]["name"], json!("C-3PO"));
    }

    #[test]
    fn test_parse_json_requires_objects() {
        assert_eq!(parse_json(r#"[{"name": "Hoth"}]"#).unwrap().len(), 1);
        assert!(parse_json(r#"{"name": "Hoth"}"#).is_err());
        assert!(parse_json(r#"[{"name": "Hoth"}, 3]"#).is_err());
    }
}
