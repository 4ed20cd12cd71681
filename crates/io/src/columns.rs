//! Column selection and header normalization.

use std::io::{BufRead, Write};

use crate::SourceError;

/// How the lookup key and the extracted field columns are chosen.
#[derive(Debug, Clone)]
pub enum ColumnSpec {
    /// Key column by name; every other column becomes a field.
    All { key: String },
    /// Key column plus an explicit field column list.
    Named { key: String, fields: Vec<String> },
    /// Numbered picks read interactively from stdin.
    Interactive,
}

/// Resolved column positions for one source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    pub key: usize,
    pub fields: Vec<usize>,
}

impl ColumnSpec {
    /// Resolve this spec against the source's column names.
    pub fn select(&self, headers: &[String]) -> Result<Selection, SourceError> {
        match self {
            Self::All { key } => {
                let key_idx = find_column(headers, key)?;
                let fields = (0..headers.len()).filter(|&i| i != key_idx).collect();
                Ok(Selection { key: key_idx, fields })
            }
            Self::Named { key, fields } => {
                let key_idx = find_column(headers, key)?;
                let fields = fields
                    .iter()
                    .map(|name| find_column(headers, name))
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(Selection { key: key_idx, fields })
            }
            Self::Interactive => {
                let stdin = std::io::stdin();
                let stderr = std::io::stderr();
                pick_columns(headers, &mut stdin.lock(), &mut stderr.lock())
            }
        }
    }
}

/// Match a requested column name against the source's column names,
/// tolerating the same key shapes the engine's resolver does (trimmed and
/// symbol-rendered forms).
fn find_column(headers: &[String], name: &str) -> Result<usize, SourceError> {
    let wanted = name.trim();
    let symbol = format!(":{wanted}");
    headers
        .iter()
        .position(|header| {
            let header = header.trim();
            header == wanted || header == symbol
        })
        .ok_or_else(|| SourceError::MissingColumn(name.to_string()))
}

/// Interactive column picker: list the available columns, ask for the main
/// lookup column, then collect field columns until "exit". Invalid numbers
/// re-prompt instead of failing.
pub fn pick_columns<R: BufRead, W: Write>(
    headers: &[String],
    input: &mut R,
    out: &mut W,
) -> Result<Selection, SourceError> {
    writeln!(out, "Available columns:").map_err(io_err)?;
    for (index, header) in headers.iter().enumerate() {
        writeln!(out, "{index}: {header}").map_err(io_err)?;
    }
    writeln!(out).map_err(io_err)?;

    write!(out, "Enter the main lookup column (usually GUID): ").map_err(io_err)?;
    out.flush().map_err(io_err)?;
    let key = loop {
        match read_line(input)?.trim().parse::<usize>() {
            Ok(n) if n < headers.len() => break n,
            _ => {
                write!(out, "Invalid column number. Please try again: ").map_err(io_err)?;
                out.flush().map_err(io_err)?;
            }
        }
    };

    let mut fields = Vec::new();
    loop {
        write!(out, "Enter a column number to extract (or \"exit\" to finish): ")
            .map_err(io_err)?;
        out.flush().map_err(io_err)?;
        let line = read_line(input)?;
        let line = line.trim();
        if line.eq_ignore_ascii_case("exit") {
            break;
        }
        match line.parse::<usize>() {
            Ok(n) if n < headers.len() => fields.push(n),
            _ => writeln!(out, "Invalid column number. Please try again.").map_err(io_err)?,
        }
    }

    Ok(Selection { key, fields })
}

fn read_line<R: BufRead>(input: &mut R) -> Result<String, SourceError> {
    let mut line = String::new();
    let read = input
        .read_line(&mut line)
        .map_err(|e| SourceError::Io(e.to_string()))?;
    if read == 0 {
        return Err(SourceError::Selection(
            "input closed before column selection finished".into(),
        ));
    }
    Ok(line)
}

fn io_err(e: std::io::Error) -> SourceError {
    SourceError::Io(e.to_string())
}

/// Display headers become lowercase-with-underscores field names.
pub fn normalize_header(header: &str) -> String {
    header.trim().to_lowercase().replace(' ', "_")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn headers(names: &[&str]) -> Vec<String> {
        names.iter().map(|n| n.to_string()).collect()
    }

    #[test]
    fn normalize_header_lowercases_and_underscores() {
        assert_eq!(normalize_header(" Zuora Account Number "), "zuora_account_number");
        assert_eq!(normalize_header("GUID"), "guid");
    }

    #[test]
    fn all_selects_every_non_key_column() {
        let h = headers(&["guid", "a", "b"]);
        let spec = ColumnSpec::All { key: "guid".into() };
        assert_eq!(
            spec.select(&h).unwrap(),
            Selection { key: 0, fields: vec![1, 2] }
        );
    }

    #[test]
    fn named_selects_in_request_order() {
        let h = headers(&["a", "guid", "b"]);
        let spec = ColumnSpec::Named { key: "guid".into(), fields: vec!["b".into(), "a".into()] };
        assert_eq!(
            spec.select(&h).unwrap(),
            Selection { key: 1, fields: vec![2, 0] }
        );
    }

    #[test]
    fn named_reports_missing_column() {
        let h = headers(&["guid", "a"]);
        let spec = ColumnSpec::Named { key: "guid".into(), fields: vec!["missing".into()] };
        let err = spec.select(&h).unwrap_err();
        assert!(matches!(err, SourceError::MissingColumn(ref name) if name == "missing"));
    }

    #[test]
    fn find_column_tolerates_symbol_rendered_headers() {
        let h = headers(&[":guid", "a"]);
        let spec = ColumnSpec::All { key: "guid".into() };
        assert_eq!(spec.select(&h).unwrap().key, 0);
    }

    #[test]
    fn interactive_picker_collects_until_exit() {
        let h = headers(&["guid", "a", "b"]);
        let mut input = Cursor::new("0\n2\n1\nexit\n");
        let mut out = Vec::new();
        let selection = pick_columns(&h, &mut input, &mut out).unwrap();
        assert_eq!(selection, Selection { key: 0, fields: vec![2, 1] });

        let prompts = String::from_utf8(out).unwrap();
        assert!(prompts.contains("0: guid"));
        assert!(prompts.contains("main lookup column"));
    }

    #[test]
    fn interactive_picker_reprompts_on_invalid_numbers() {
        let h = headers(&["guid", "a"]);
        let mut input = Cursor::new("9\nx\n0\n7\n1\nEXIT\n");
        let mut out = Vec::new();
        let selection = pick_columns(&h, &mut input, &mut out).unwrap();
        assert_eq!(selection, Selection { key: 0, fields: vec![1] });

        let prompts = String::from_utf8(out).unwrap();
        assert!(prompts.contains("Invalid column number"));
    }

    #[test]
    fn interactive_picker_fails_on_closed_input() {
        let h = headers(&["guid"]);
        let mut input = Cursor::new("");
        let mut out = Vec::new();
        let err = pick_columns(&h, &mut input, &mut out).unwrap_err();
        assert!(matches!(err, SourceError::Selection(_)));
    }
}
