//! `SanitizingWriter`: the single write path to the document store.
//!
//! Every outgoing document is scrubbed and stamped with a server-assigned
//! `updatedAt` before it leaves the process, so the store never receives a
//! missing sentinel or a non-finite number.

use crate::document::{Document, Sentinel, Value};
use crate::errors::WriteError;
use crate::sanitize::{scrub_document, MissingPolicy};
use crate::store::{DocumentStore, Precondition, TxnOutcome};
use std::sync::Arc;
use tracing::debug;

/// Field stamped on every write with the store's clock.
pub const UPDATED_AT_FIELD: &str = "updatedAt";

#[derive(Clone)]
pub struct SanitizingWriter {
    store: Arc<dyn DocumentStore>,
    policy: MissingPolicy,
}

impl SanitizingWriter {
    pub fn new(store: Arc<dyn DocumentStore>, policy: MissingPolicy) -> Self {
        Self { store, policy }
    }

    /// Writer with the crate-default missing policy (null replacement).
    pub fn with_default_policy(store: Arc<dyn DocumentStore>) -> Self {
        Self::new(store, MissingPolicy::default())
    }

    pub fn store(&self) -> &Arc<dyn DocumentStore> {
        &self.store
    }

    pub fn policy(&self) -> MissingPolicy {
        self.policy
    }

    /// The cleaned record, without writing it. For callers that need the
    /// sanitized shape for local state.
    pub fn scrub_only(&self, doc: &Document) -> Document {
        scrub_document(doc, self.policy)
    }

    /// Scrubs `doc`, stamps `updatedAt`, and merge-writes it at `path`.
    /// Fields not present in `doc` are preserved at the store.
    pub async fn safe_write(&self, path: &str, doc: &Document) -> Result<(), WriteError> {
        let clean = self.prepare(doc);
        debug!(path, fields = clean.len(), "merge-writing sanitized document");
        self.store.merge(path, clean).await.map_err(WriteError::from)
    }

    /// Conditional variant of [`safe_write`](Self::safe_write): the merge is
    /// applied atomically only if `precondition` holds at the store.
    pub async fn safe_write_if(
        &self,
        path: &str,
        precondition: &Precondition,
        doc: &Document,
    ) -> Result<TxnOutcome, WriteError> {
        let clean = self.prepare(doc);
        debug!(path, fields = clean.len(), "conditional merge-write");
        self.store
            .merge_if(path, precondition, clean)
            .await
            .map_err(WriteError::from)
    }

    fn prepare(&self, doc: &Document) -> Document {
        let mut clean = scrub_document(doc, self.policy);
        clean.insert(
            UPDATED_AT_FIELD.to_string(),
            Value::Sentinel(Sentinel::ServerTimestamp),
        );
        clean
    }
}
