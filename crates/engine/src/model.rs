use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Input
// ---------------------------------------------------------------------------

/// A raw field value as read from a source document.
///
/// Sources are tolerated as-is: a cell may hold text, a number, or nothing.
/// `Null` is what an explicitly-empty cell deserializes to; it is treated as
/// absent everywhere downstream.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Scalar {
    Text(String),
    Int(i64),
    Float(f64),
    Null,
}

impl Scalar {
    /// String rendering, used for output keys and value normalization.
    pub fn render(&self) -> String {
        match self {
            Self::Text(s) => s.clone(),
            Self::Int(n) => n.to_string(),
            Self::Float(f) => f.to_string(),
            Self::Null => String::new(),
        }
    }
}

impl From<&str> for Scalar {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<i64> for Scalar {
    fn from(n: i64) -> Self {
        Self::Int(n)
    }
}

/// Field name → raw value for one record.
pub type FieldMap = BTreeMap<String, Scalar>;

/// One source row: the business-identifier key plus the remaining selected
/// fields. A source row with no extractable fields carries an empty map, so
/// a "missing nested section" is unrepresentable by construction.
///
/// A sequence may contain the same key more than once (e.g. one row per
/// subscription of an account); occurrence order is significant.
#[derive(Debug, Clone, PartialEq)]
pub struct SingleKeyRecord {
    pub key: Scalar,
    pub fields: FieldMap,
}

impl SingleKeyRecord {
    pub fn new(key: impl Into<Scalar>, fields: FieldMap) -> Self {
        Self { key: key.into(), fields }
    }
}

// ---------------------------------------------------------------------------
// Output
// ---------------------------------------------------------------------------

/// One reconciled mapping row.
///
/// Every optional field is *omitted* from serialized output when its source
/// value was unresolvable or empty: absent, not null.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OutputRecord {
    pub client_business_guid: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_business_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub zuora_account_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub old_zuora_account_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sub_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub zuora_subscription_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub old_zuora_subscription_number: Option<String>,
}

impl OutputRecord {
    pub fn new(client_business_guid: String) -> Self {
        Self {
            client_business_guid,
            client_business_id: None,
            zuora_account_number: None,
            old_zuora_account_number: None,
            sub_id: None,
            zuora_subscription_number: None,
            old_zuora_subscription_number: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unresolved_fields_are_omitted_not_null() {
        let row = OutputRecord::new("G1".into());
        let json = serde_json::to_string(&row).unwrap();
        assert_eq!(json, r#"{"client_business_guid":"G1"}"#);
    }

    #[test]
    fn scalar_rendering() {
        assert_eq!(Scalar::from("abc").render(), "abc");
        assert_eq!(Scalar::Int(42).render(), "42");
        assert_eq!(Scalar::Null.render(), "");
    }
}
