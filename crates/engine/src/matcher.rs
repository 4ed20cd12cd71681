use crate::model::{FieldMap, Scalar, SingleKeyRecord};
use crate::resolve::keys_match;

/// Find the admin record matching a business identifier, first-match-wins.
///
/// O(n) per lookup. The admin export is small relative to migration batch
/// sizes, and first-match-wins must hold even when the export carries
/// duplicate keys, so the linear scan stays.
pub fn find<'a>(admin_records: &'a [SingleKeyRecord], key: &Scalar) -> Option<&'a FieldMap> {
    admin_records
        .iter()
        .find(|record| keys_match(&record.key, key))
        .map(|record| &record.fields)
}
