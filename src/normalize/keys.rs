//! Feed key normalization
//!
//! The legacy feeds are inconsistent about key casing and separators
//! ("Video Section", "Post-Date", "post_date" all occur). Everything is
//! folded to snake_case before coercion so the rule table only has to
//! know one spelling.

use serde_json::{Map, Value};

/// Recursively normalize every object key: lower-case, spaces and hyphens
/// become underscores. Scalars pass through unchanged. Idempotent.
pub fn fix_keys(value: Value) -> Value {
    match value {
        Value::Object(map) => Value::Object(fix_record(map)),
        Value::Array(items) => Value::Array(items.into_iter().map(fix_keys).collect()),
        other => other,
    }
}

/// Normalize the keys of a single record (and everything nested in it).
pub(crate) fn fix_record(map: Map<String, Value>) -> Map<String, Value> {
    map.into_iter()
        .map(|(k, v)| (fix_key(&k), fix_keys(v)))
        .collect()
}

fn fix_key(key: &str) -> String {
    key.to_lowercase().replace([' ', '-'], "_")
}
