//! Excel export import (xlsx, xls).

use std::path::Path;

use calamine::{open_workbook_auto, Data, Reader};
use zrecon_engine::{FieldMap, Scalar, SingleKeyRecord};

use crate::columns::{normalize_header, ColumnSpec};
use crate::SourceError;

/// Read the first worksheet: row 1 is headers, every following row becomes
/// one single-key record. Rows with a blank key cell are skipped; blank
/// cells elsewhere simply produce no field.
pub fn read(path: &Path, spec: &ColumnSpec) -> Result<Vec<SingleKeyRecord>, SourceError> {
    let mut workbook = open_workbook_auto(path)
        .map_err(|e| SourceError::Io(format!("{}: {e}", path.display())))?;
    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| SourceError::Parse(format!("{}: workbook has no sheets", path.display())))?
        .map_err(|e| SourceError::Parse(e.to_string()))?;

    let mut rows = range.rows();
    let headers: Vec<String> = rows
        .next()
        .unwrap_or(&[])
        .iter()
        .map(|cell| normalize_header(&cell_text(cell)))
        .collect();
    let selection = spec.select(&headers)?;

    let mut records = Vec::new();
    for row in rows {
        let Some(key) = row.get(selection.key).and_then(cell_scalar) else {
            continue;
        };
        let mut fields = FieldMap::new();
        for &col in &selection.fields {
            if let Some(value) = row.get(col).and_then(cell_scalar) {
                fields.insert(headers[col].clone(), value);
            }
        }
        records.push(SingleKeyRecord::new(key, fields));
    }

    Ok(records)
}

fn cell_text(cell: &Data) -> String {
    match cell {
        Data::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn cell_scalar(cell: &Data) -> Option<Scalar> {
    match cell {
        Data::Empty => None,
        Data::String(s) if s.trim().is_empty() => None,
        Data::String(s) => Some(Scalar::Text(s.clone())),
        Data::Int(n) => Some(Scalar::Int(*n)),
        // Excel numbers are floats; keep integral values as integers so
        // identifier columns round-trip cleanly.
        Data::Float(f) if f.fract() == 0.0 && f.abs() < 9e15 => Some(Scalar::Int(*f as i64)),
        Data::Float(f) => Some(Scalar::Float(*f)),
        Data::Bool(b) => Some(Scalar::Text(if *b { "TRUE" } else { "FALSE" }.into())),
        Data::DateTime(dt) => Some(Scalar::Float(dt.as_f64())),
        Data::DateTimeIso(s) | Data::DurationIso(s) => Some(Scalar::Text(s.clone())),
        Data::Error(e) => Some(Scalar::Text(format!("#{e:?}"))),
    }
}
