//! Feed response normalization
//!
//! Takes one raw feed payload (a deeply nested JSON envelope with
//! inconsistent key spellings and stringly-typed values) and produces a
//! flat, typed [`Batch`](crate::types::Batch) of records. The pipeline is
//! a pure function of its input:
//!
//! 1. unwrap the single-key envelope into a list of records
//! 2. normalize key spellings ([`fix_keys`])
//! 3. coerce values by the per-key rule table ([`convert_values`])
//! 4. pick the entity variant once per batch and construct it

mod keys;
mod values;

pub use keys::fix_keys;
pub use values::{convert_values, to_minutes, TYPE_PREFIX_LEN};

use serde_json::{Map, Value};
use thiserror::Error;

use crate::types::Batch;

use self::keys::fix_record;

/// Errors produced while normalizing a feed payload.
#[derive(Debug, Error)]
pub enum NormalizeError {
    #[error("Unexpected payload shape: {0}")]
    Shape(String),

    #[error("Cannot coerce field `{field}` from {value}")]
    Coercion { field: String, value: String },

    #[error("Invalid date {value} in field `{field}`")]
    DateParse { field: String, value: String },
}

/// Normalize one feed payload into a typed batch.
///
/// The payload must be an object with exactly one top-level key whose
/// value is an array of single-key wrapper objects, each wrapping a
/// record object. Produces exactly one output record per input element.
pub fn process_response(payload: Value) -> Result<Batch, NormalizeError> {
    let records = unwrap_payload(payload)?;

    let mut normalized = Vec::with_capacity(records.len());
    for record in records {
        let mut record = fix_record(record);
        convert_values(&mut record)?;
        normalized.push(record);
    }

    Batch::from_records(normalized)
}

/// Collapse the feed envelope into the list of record objects.
fn unwrap_payload(payload: Value) -> Result<Vec<Map<String, Value>>, NormalizeError> {
    let Value::Object(map) = payload else {
        return Err(NormalizeError::Shape("payload is not an object".to_string()));
    };
    if map.len() != 1 {
        return Err(NormalizeError::Shape(format!(
            "expected exactly one top-level key, found {}",
            map.len()
        )));
    }
    let Some((_, list)) = map.into_iter().next() else {
        return Err(NormalizeError::Shape("payload is empty".to_string()));
    };
    let Value::Array(items) = list else {
        return Err(NormalizeError::Shape(
            "top-level value is not an array".to_string(),
        ));
    };

    let mut records = Vec::with_capacity(items.len());
    for (i, item) in items.into_iter().enumerate() {
        let Value::Object(wrapper) = item else {
            return Err(NormalizeError::Shape(format!(
                "element {i} is not a single-key wrapper object"
            )));
        };
        if wrapper.len() != 1 {
            return Err(NormalizeError::Shape(format!(
                "element {i} wraps {} keys, expected 1",
                wrapper.len()
            )));
        }
        match wrapper.into_iter().next() {
            Some((_, Value::Object(record))) => records.push(record),
            _ => {
                return Err(NormalizeError::Shape(format!(
                    "element {i} does not wrap a record object"
                )));
            }
        }
    }
    Ok(records)
}
