//! Tagged value model for documents destined for the external store.
//!
//! Write payloads arrive as arbitrarily nested data that may carry values
//! the store cannot represent: a "missing" sentinel (the undefined slot in
//! a partially-populated form), non-finite numbers, and opaque markers such
//! as the server-timestamp placeholder. Modeling the payload as a closed
//! recursive enum lets the sanitizer handle every case exhaustively instead
//! of probing runtime types.

use serde::de::DeserializeOwned;
use serde::Serialize;
use std::collections::BTreeMap;
use thiserror::Error;

/// A document is an ordered mapping from field name to value.
pub type Document = BTreeMap<String, Value>;

/// Opaque markers resolved by the store at write time. The sanitizer passes
/// these through by identity and never descends into them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sentinel {
    /// Replaced with the store's clock when the write is applied.
    ServerTimestamp,
}

/// A single value inside a document.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// The "missing" slot sentinel. Never allowed to reach the store.
    Missing,
    Null,
    Bool(bool),
    Number(f64),
    String(String),
    Array(Vec<Value>),
    Map(Document),
    Sentinel(Sentinel),
}

impl Value {
    pub fn is_missing(&self) -> bool {
        matches!(self, Value::Missing)
    }

    /// True for any number the store would reject.
    pub fn is_non_finite_number(&self) -> bool {
        matches!(self, Value::Number(n) if !n.is_finite())
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Number(n)
    }
}

#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("missing-value sentinel cannot be represented")]
    MissingValue,
    #[error("non-finite number cannot be represented")]
    NonFiniteNumber,
    #[error("unresolved sentinel cannot be represented")]
    UnresolvedSentinel,
    #[error("expected a top-level object, got a scalar or array")]
    NotAnObject,
    #[error("serde conversion failed: {0}")]
    Serde(#[from] serde_json::Error),
}

impl From<serde_json::Value> for Value {
    fn from(json: serde_json::Value) -> Self {
        match json {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Bool(b),
            // Integers beyond f64 precision are out of range for the
            // café-scale quantities this store holds.
            serde_json::Value::Number(n) => n.as_f64().map(Value::Number).unwrap_or(Value::Null),
            serde_json::Value::String(s) => Value::String(s),
            serde_json::Value::Array(items) => {
                Value::Array(items.into_iter().map(Value::from).collect())
            }
            serde_json::Value::Object(fields) => Value::Map(
                fields
                    .into_iter()
                    .map(|(k, v)| (k, Value::from(v)))
                    .collect(),
            ),
        }
    }
}

/// Only scrubbed, sentinel-resolved documents convert back to JSON; the
/// conversion is the proof obligation that sanitization did its job.
impl TryFrom<Value> for serde_json::Value {
    type Error = DocumentError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::Missing => Err(DocumentError::MissingValue),
            Value::Null => Ok(serde_json::Value::Null),
            Value::Bool(b) => Ok(serde_json::Value::Bool(b)),
            Value::Number(n) => serde_json::Number::from_f64(n)
                .map(serde_json::Value::Number)
                .ok_or(DocumentError::NonFiniteNumber),
            Value::String(s) => Ok(serde_json::Value::String(s)),
            Value::Array(items) => Ok(serde_json::Value::Array(
                items
                    .into_iter()
                    .map(serde_json::Value::try_from)
                    .collect::<Result<_, _>>()?,
            )),
            Value::Map(fields) => Ok(serde_json::Value::Object(
                fields
                    .into_iter()
                    .map(|(k, v)| serde_json::Value::try_from(v).map(|v| (k, v)))
                    .collect::<Result<_, _>>()?,
            )),
            Value::Sentinel(_) => Err(DocumentError::UnresolvedSentinel),
        }
    }
}

/// Serializes a typed model into a document.
pub fn to_document<T: Serialize>(model: &T) -> Result<Document, DocumentError> {
    match Value::from(serde_json::to_value(model)?) {
        Value::Map(doc) => Ok(doc),
        _ => Err(DocumentError::NotAnObject),
    }
}

/// Deserializes a typed model out of a stored document. Unknown fields
/// (e.g. the writer's `updatedAt` stamp) are ignored.
pub fn from_document<T: DeserializeOwned>(doc: &Document) -> Result<T, DocumentError> {
    let json = serde_json::Value::try_from(Value::Map(doc.clone()))?;
    Ok(serde_json::from_value(json)?)
}
