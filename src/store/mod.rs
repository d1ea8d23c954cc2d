//! Persistence collaborator: a document-oriented store addressed by path.
//!
//! The store is injected wherever persistence is needed; nothing in this
//! crate reaches for a global handle. Implementations must resolve
//! [`Sentinel::ServerTimestamp`](crate::document::Sentinel) to their own
//! clock at write time and must make [`DocumentStore::merge_if`] atomic
//! with respect to other writers of the same path.

use crate::document::{Document, Value};
use async_trait::async_trait;
use thiserror::Error;
use uuid::Uuid;

pub mod memory;

pub use memory::InMemoryStore;

/// Failure classes a document store can report. `Unavailable` is the one
/// transient class; callers own the retry policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display)]
#[strum(serialize_all = "snake_case")]
pub enum StoreErrorKind {
    Unavailable,
    PermissionDenied,
    QuotaExceeded,
    Corrupt,
}

#[derive(Debug, Clone, Error)]
#[error("store error ({kind}): {message}")]
pub struct StoreError {
    pub kind: StoreErrorKind,
    pub message: String,
}

impl StoreError {
    pub fn new(kind: StoreErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::new(StoreErrorKind::Unavailable, message)
    }

    pub fn permission_denied(message: impl Into<String>) -> Self {
        Self::new(StoreErrorKind::PermissionDenied, message)
    }

    /// Whether a retry could plausibly succeed.
    pub fn is_transient(&self) -> bool {
        matches!(self.kind, StoreErrorKind::Unavailable)
    }
}

/// Precondition for a conditional merge-write, checked atomically against
/// the current document at the path.
#[derive(Debug, Clone, PartialEq)]
pub enum Precondition {
    FieldEquals { field: String, value: Value },
}

impl Precondition {
    pub fn field_equals(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Precondition::FieldEquals {
            field: field.into(),
            value: value.into(),
        }
    }

    pub fn holds(&self, doc: &Document) -> bool {
        match self {
            Precondition::FieldEquals { field, value } => doc.get(field) == Some(value),
        }
    }
}

/// Outcome of a conditional merge-write.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TxnOutcome {
    Applied,
    ConditionFailed,
    NotFound,
}

#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Reads the document at `path`, if any.
    async fn get(&self, path: &str) -> Result<Option<Document>, StoreError>;

    /// Creates or fully overwrites the document at `path`.
    async fn set(&self, path: &str, doc: Document) -> Result<(), StoreError>;

    /// Merge-writes `doc` into the document at `path`: fields present in
    /// `doc` are overwritten (nested maps merge field-by-field), fields
    /// absent from `doc` are preserved. Creates the document if absent.
    async fn merge(&self, path: &str, doc: Document) -> Result<(), StoreError>;

    /// Atomically merge-writes `doc` only if `precondition` holds against
    /// the current document. Never applies a partial write.
    async fn merge_if(
        &self,
        path: &str,
        precondition: &Precondition,
        doc: Document,
    ) -> Result<TxnOutcome, StoreError>;

    /// Allocates a fresh document id.
    fn allocate_id(&self) -> Uuid {
        Uuid::new_v4()
    }
}
