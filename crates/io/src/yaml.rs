//! YAML export import.
//!
//! The legacy admin tool exports a document sequence; the entry tagged
//! `type: "table"` carries the records under `data:`. Field names are kept
//! exactly as the export wrote them, symbol-rendered keys included, since
//! the engine's resolver owns key-shape tolerance.

use std::fs;
use std::path::Path;

use serde_yaml::{Mapping, Value};
use zrecon_engine::{FieldMap, Scalar, SingleKeyRecord};

use crate::columns::ColumnSpec;
use crate::SourceError;

pub fn read(path: &Path, spec: &ColumnSpec) -> Result<Vec<SingleKeyRecord>, SourceError> {
    let text = fs::read_to_string(path)
        .map_err(|e| SourceError::Io(format!("{}: {e}", path.display())))?;
    let doc: Value = serde_yaml::from_str(&text)
        .map_err(|e| SourceError::Parse(format!("{}: {e}", path.display())))?;

    // An export with no table section is empty, not malformed.
    let Some(data) = table_data(&doc) else {
        return Ok(Vec::new());
    };
    let headers: Vec<String> = match data.first().and_then(Value::as_mapping) {
        Some(first) => first.keys().map(render_key).collect(),
        None => return Ok(Vec::new()),
    };
    let selection = spec.select(&headers)?;

    let mut records = Vec::new();
    for entry in data {
        let Some(mapping) = entry.as_mapping() else {
            continue;
        };
        let Some(key) = lookup(mapping, &headers[selection.key]).and_then(yaml_scalar) else {
            continue;
        };
        let mut fields = FieldMap::new();
        for &col in &selection.fields {
            if let Some(value) = lookup(mapping, &headers[col]).and_then(yaml_scalar) {
                fields.insert(headers[col].clone(), value);
            }
        }
        records.push(SingleKeyRecord::new(key, fields));
    }

    Ok(records)
}

fn table_data(doc: &Value) -> Option<&Vec<Value>> {
    let entries = doc.as_sequence()?;
    let table = entries
        .iter()
        .find(|entry| entry.get("type").and_then(Value::as_str) == Some("table"))?;
    table.get("data")?.as_sequence()
}

fn lookup<'a>(mapping: &'a Mapping, name: &str) -> Option<&'a Value> {
    mapping
        .iter()
        .find(|(key, _)| render_key(key) == name)
        .map(|(_, value)| value)
}

fn render_key(key: &Value) -> String {
    match key {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        other => serde_yaml::to_string(other).unwrap_or_default().trim().to_string(),
    }
}

fn yaml_scalar(value: &Value) -> Option<Scalar> {
    match value {
        Value::Null => None,
        Value::Bool(b) => Some(Scalar::Text(b.to_string())),
        Value::Number(n) => n
            .as_i64()
            .map(Scalar::Int)
            .or_else(|| n.as_f64().map(Scalar::Float)),
        Value::String(s) if s.trim().is_empty() => None,
        Value::String(s) => Some(Scalar::Text(s.clone())),
        // Nested structures have no single-cell meaning here.
        Value::Sequence(_) | Value::Mapping(_) | Value::Tagged(_) => None,
    }
}
