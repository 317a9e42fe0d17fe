use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Serialize;

use crate::model::MovieRecord;

/// Write records as a 4-space indented JSON array, replacing `path`.
pub fn write_records(path: &Path, records: &[MovieRecord]) -> Result<()> {
    let mut buf = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
    records.serialize(&mut ser)?;
    fs::write(path, buf).with_context(|| format!("Failed to write {}", path.display()))
}

/// Read one collection file.
pub fn read_collection(path: &Path) -> Result<Vec<MovieRecord>> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("Failed to read collection {}", path.display()))?;
    serde_json::from_str(&raw)
        .with_context(|| format!("Malformed collection {}", path.display()))
}

/// File names of the `.json` collections in `dir`, sorted.
pub fn list_collections(dir: &Path) -> Result<Vec<String>> {
    let entries = fs::read_dir(dir)
        .with_context(|| format!("Failed to list collections in {}", dir.display()))?;

    let mut names = Vec::new();
    for entry in entries {
        let path = entry?.path();
        if !path.is_file() || path.extension().and_then(|e| e.to_str()) != Some("json") {
            continue;
        }
        if let Some(name) = path.file_name().and_then(|n| n.to_str()) {
            names.push(name.to_string());
        }
    }
    names.sort();
    Ok(names)
}
