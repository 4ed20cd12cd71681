//! Key-representation-agnostic field lookup and value normalization.
//!
//! The two source formats construct field maps differently: spreadsheet
//! headers arrive normalized, but YAML exports of legacy (Ruby-era) data may
//! carry symbol-rendered keys (`:sub_id`) or stray whitespace. Every field
//! access in the engine goes through [`resolve`] so no caller has to
//! special-case per-format key shapes.

use crate::model::{FieldMap, Scalar};

/// Look up `name` in a field map regardless of how the source rendered the
/// key: the exact name first, then a whitespace-trimmed match, then the
/// symbol-rendered form (`:name`).
///
/// Returns `None` when no representation matches, so callers can distinguish
/// "field not present" from "field present but empty."
pub fn resolve<'a>(map: &'a FieldMap, name: &str) -> Option<&'a Scalar> {
    if let Some(value) = map.get(name) {
        return Some(value);
    }
    let wanted = name.trim();
    let symbol = format!(":{wanted}");
    map.iter()
        .find(|(key, _)| {
            let key = key.trim();
            key == wanted || key == symbol
        })
        .map(|(_, value)| value)
}

/// Render a resolved value to a trimmed string. Absent, null, and
/// empty-after-trim all collapse to `None`.
pub fn normalize(value: Option<&Scalar>) -> Option<String> {
    let rendered = match value? {
        Scalar::Null => return None,
        other => other.render(),
    };
    let trimmed = rendered.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Best-effort integer coercion for legacy identifier fields: leading digits
/// parse (sign allowed), non-numeric content yields 0. Absent and null stay
/// absent so the caller can omit the field entirely.
pub fn coerce_int(value: Option<&Scalar>) -> Option<i64> {
    match value? {
        Scalar::Null => None,
        Scalar::Int(n) => Some(*n),
        Scalar::Float(f) => Some(*f as i64),
        Scalar::Text(s) => Some(leading_int(s)),
    }
}

fn leading_int(s: &str) -> i64 {
    let s = s.trim_start();
    let (negative, rest) = match s.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, s.strip_prefix('+').unwrap_or(s)),
    };
    let digits: String = rest.chars().take_while(|c| c.is_ascii_digit()).collect();
    if digits.is_empty() {
        return 0;
    }
    let n: i64 = digits.parse().unwrap_or(0);
    if negative {
        -n
    } else {
        n
    }
}

/// Exact key equality for business identifiers, tolerating a symbol-rendered
/// string form on either side. The key value itself is never normalized.
pub fn keys_match(a: &Scalar, b: &Scalar) -> bool {
    if a == b {
        return true;
    }
    match (a, b) {
        (Scalar::Text(x), Scalar::Text(y)) => {
            x.strip_prefix(':').unwrap_or(x) == y.strip_prefix(':').unwrap_or(y)
        }
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::FieldMap;

    fn map(entries: &[(&str, Scalar)]) -> FieldMap {
        entries
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect()
    }

    #[test]
    fn resolve_exact_key() {
        let m = map(&[("sub_id", Scalar::Int(7))]);
        assert_eq!(resolve(&m, "sub_id"), Some(&Scalar::Int(7)));
    }

    #[test]
    fn resolve_symbol_rendered_key() {
        let m = map(&[(":sub_id", Scalar::Int(7))]);
        assert_eq!(resolve(&m, "sub_id"), Some(&Scalar::Int(7)));
    }

    #[test]
    fn resolve_whitespace_damaged_key() {
        let m = map(&[(" sub_id ", Scalar::Int(7))]);
        assert_eq!(resolve(&m, "sub_id"), Some(&Scalar::Int(7)));
    }

    #[test]
    fn resolve_missing_is_none() {
        let m = map(&[("sub_id", Scalar::Int(7))]);
        assert_eq!(resolve(&m, "client_business_id"), None);
    }

    #[test]
    fn normalize_trims_and_drops_empty() {
        assert_eq!(normalize(Some(&Scalar::from(" A-1 "))), Some("A-1".into()));
        assert_eq!(normalize(Some(&Scalar::from("   "))), None);
        assert_eq!(normalize(Some(&Scalar::from(""))), None);
        assert_eq!(normalize(Some(&Scalar::Null)), None);
        assert_eq!(normalize(None), None);
    }

    #[test]
    fn normalize_renders_numbers() {
        assert_eq!(normalize(Some(&Scalar::Int(1001))), Some("1001".into()));
    }

    #[test]
    fn coerce_int_leading_digits() {
        assert_eq!(coerce_int(Some(&Scalar::from("1001"))), Some(1001));
        assert_eq!(coerce_int(Some(&Scalar::from("42abc"))), Some(42));
        assert_eq!(coerce_int(Some(&Scalar::from("-17x"))), Some(-17));
        assert_eq!(coerce_int(Some(&Scalar::from("abc"))), Some(0));
        assert_eq!(coerce_int(Some(&Scalar::from(""))), Some(0));
    }

    #[test]
    fn coerce_int_absent_stays_absent() {
        assert_eq!(coerce_int(None), None);
        assert_eq!(coerce_int(Some(&Scalar::Null)), None);
    }

    #[test]
    fn coerce_int_numeric_scalars() {
        assert_eq!(coerce_int(Some(&Scalar::Int(9))), Some(9));
        assert_eq!(coerce_int(Some(&Scalar::Float(9.7))), Some(9));
    }

    #[test]
    fn keys_match_exact_and_symbol() {
        assert!(keys_match(&Scalar::from("G1"), &Scalar::from("G1")));
        assert!(keys_match(&Scalar::from(":G1"), &Scalar::from("G1")));
        assert!(keys_match(&Scalar::Int(7), &Scalar::Int(7)));
        assert!(!keys_match(&Scalar::from("G1"), &Scalar::from("g1")));
        assert!(!keys_match(&Scalar::from(" G1"), &Scalar::from("G1")));
    }
}
