//! `zrecon-io` — source readers.
//!
//! Turns a spreadsheet or structured-document export into the ordered
//! sequence of single-key records the engine consumes. Readers never judge
//! data quality: absent and blank cells simply produce no field.

use std::fmt;
use std::path::Path;

use zrecon_engine::SingleKeyRecord;

pub mod columns;
pub mod csv;
pub mod xlsx;
pub mod yaml;

pub use columns::ColumnSpec;

#[derive(Debug)]
pub enum SourceError {
    /// File extension not handled by any reader.
    UnsupportedFileType(String),
    /// Underlying file IO failure.
    Io(String),
    /// Document structure could not be parsed.
    Parse(String),
    /// A requested column is not present in the source.
    MissingColumn(String),
    /// Interactive column selection was aborted.
    Selection(String),
}

impl fmt::Display for SourceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnsupportedFileType(path) => write!(f, "unsupported file type: {path}"),
            Self::Io(msg) => write!(f, "IO error: {msg}"),
            Self::Parse(msg) => write!(f, "parse error: {msg}"),
            Self::MissingColumn(name) => write!(f, "missing column '{name}'"),
            Self::Selection(msg) => write!(f, "column selection error: {msg}"),
        }
    }
}

impl std::error::Error for SourceError {}

/// Read one export into single-key records, dispatching on file extension.
pub fn read_records(path: &Path, spec: &ColumnSpec) -> Result<Vec<SingleKeyRecord>, SourceError> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase)
        .unwrap_or_default();

    match ext.as_str() {
        "xlsx" | "xls" => xlsx::read(path, spec),
        "yaml" | "yml" => yaml::read(path, spec),
        "csv" => csv::read(path, spec),
        _ => Err(SourceError::UnsupportedFileType(path.display().to_string())),
    }
}
