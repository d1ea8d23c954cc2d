//! Structural sanitization of write payloads.
//!
//! `scrub` is total: it never fails and its output contains no missing
//! sentinel and no non-finite number, so every write path can apply it
//! unconditionally without extra error handling.

use crate::document::{Document, Value};
use serde::{Deserialize, Serialize};

/// What to do with a map entry whose value is the missing sentinel (or a
/// NaN, which is equally unrepresentable).
///
/// `Null` is the crate default: replacing with an explicit null keeps the
/// document schema stable across writes, so readers see a consistent field
/// set. `Drop` removes the entry entirely.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MissingPolicy {
    Drop,
    #[default]
    Null,
}

/// Recursively cleans a value. Sentinels pass through untouched, arrays
/// keep their length and order, maps are rebuilt without aliasing the
/// input. Non-finite numbers never survive: infinities become 0.0, NaN
/// follows the missing policy in maps and becomes 0.0 in arrays (where an
/// entry cannot be dropped without changing the shape).
pub fn scrub(value: &Value, policy: MissingPolicy) -> Value {
    match value {
        Value::Missing => Value::Null,
        Value::Number(n) if !n.is_finite() => Value::Number(0.0),
        Value::Array(items) => Value::Array(items.iter().map(|v| scrub(v, policy)).collect()),
        Value::Map(doc) => Value::Map(scrub_document(doc, policy)),
        other => other.clone(),
    }
}

/// Cleans a document, applying the missing policy to its entries at every
/// nesting level.
pub fn scrub_document(doc: &Document, policy: MissingPolicy) -> Document {
    let mut clean = Document::new();
    for (key, value) in doc {
        match value {
            Value::Missing => {
                if policy == MissingPolicy::Null {
                    clean.insert(key.clone(), Value::Null);
                }
            }
            Value::Number(n) if n.is_nan() => {
                if policy == MissingPolicy::Null {
                    clean.insert(key.clone(), Value::Number(0.0));
                }
            }
            other => {
                clean.insert(key.clone(), scrub(other, policy));
            }
        }
    }
    clean
}
