//! Mapping specification files

use anyhow::{Context, Result};
use holocron_core::MappingSpecs;
use std::fs;
use std::path::Path;

/// Load mapping overrides from JSON or YAML (by extension) and merge them
/// over the stock specifications
pub fn load_mapping(path: &Path) -> Result<MappingSpecs> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("Failed to read mapping file {:?}", path))?;

    let is_yaml = matches!(
        path.extension().and_then(|ext| ext.to_str()),
        Some("yaml") | Some("yml")
    );

    let overrides: MappingSpecs = if is_yaml {
        serde_yaml::from_str(&text).with_context(|| format!("Invalid YAML mapping {:?}", path))?
    } else {
        serde_json::from_str(&text).with_context(|| format!("Invalid JSON mapping {:?}", path))?
    };

    let specs = MappingSpecs::default().merge(overrides);
    specs.validate()?;
    Ok(specs)
}
