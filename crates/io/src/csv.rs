//! CSV export import.

use std::path::Path;

use zrecon_engine::{FieldMap, Scalar, SingleKeyRecord};

use crate::columns::{normalize_header, ColumnSpec};
use crate::SourceError;

pub fn read(path: &Path, spec: &ColumnSpec) -> Result<Vec<SingleKeyRecord>, SourceError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_path(path)
        .map_err(|e| SourceError::Io(format!("{}: {e}", path.display())))?;

    let headers: Vec<String> = reader
        .headers()
        .map_err(|e| SourceError::Parse(e.to_string()))?
        .iter()
        .map(normalize_header)
        .collect();
    let selection = spec.select(&headers)?;

    let mut records = Vec::new();
    for result in reader.records() {
        let row = result.map_err(|e| SourceError::Parse(e.to_string()))?;
        let Some(key) = row.get(selection.key).and_then(field_scalar) else {
            continue;
        };
        let mut fields = FieldMap::new();
        for &col in &selection.fields {
            if let Some(value) = row.get(col).and_then(field_scalar) {
                fields.insert(headers[col].clone(), value);
            }
        }
        records.push(SingleKeyRecord::new(key, fields));
    }

    Ok(records)
}

/// CSV values are untyped text; the engine coerces identifiers later.
fn field_scalar(raw: &str) -> Option<Scalar> {
    if raw.trim().is_empty() {
        None
    } else {
        Some(Scalar::Text(raw.to_string()))
    }
}
