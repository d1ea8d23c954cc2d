//! In-memory document store, used by the test suite and by embedders that
//! run without a hosted backend.

use super::{DocumentStore, Precondition, StoreError, TxnOutcome};
use crate::document::{Document, Sentinel, Value};
use async_trait::async_trait;
use chrono::Utc;
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use std::sync::Mutex;

/// DashMap's per-key entry locking is what makes `merge_if` atomic here:
/// the precondition check and the merge happen under the same shard guard.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    docs: DashMap<String, Document>,
    fail_next: Mutex<Option<StoreError>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes the next store operation fail with `error`. Test hook for
    /// exercising write-failure paths.
    pub fn fail_next(&self, error: StoreError) {
        *self.fail_next.lock().unwrap() = Some(error);
    }

    pub fn len(&self) -> usize {
        self.docs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.docs.is_empty()
    }

    fn take_injected_failure(&self) -> Result<(), StoreError> {
        match self.fail_next.lock().unwrap().take() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

/// Replaces server-timestamp sentinels with the store clock, recursively.
fn resolve_sentinels(value: Value, now: &str) -> Value {
    match value {
        Value::Sentinel(Sentinel::ServerTimestamp) => Value::String(now.to_string()),
        Value::Array(items) => Value::Array(
            items
                .into_iter()
                .map(|v| resolve_sentinels(v, now))
                .collect(),
        ),
        Value::Map(doc) => Value::Map(resolve_document(doc, now)),
        other => other,
    }
}

fn resolve_document(doc: Document, now: &str) -> Document {
    doc.into_iter()
        .map(|(k, v)| (k, resolve_sentinels(v, now)))
        .collect()
}

/// Field-level merge: incoming fields overwrite, nested maps merge
/// recursively, untouched fields survive.
fn merge_into(target: &mut Document, incoming: Document) {
    for (key, value) in incoming {
        match (target.get_mut(&key), value) {
            (Some(Value::Map(existing)), Value::Map(incoming_map)) => {
                merge_into(existing, incoming_map);
            }
            (_, value) => {
                target.insert(key, value);
            }
        }
    }
}

#[async_trait]
impl DocumentStore for InMemoryStore {
    async fn get(&self, path: &str) -> Result<Option<Document>, StoreError> {
        self.take_injected_failure()?;
        Ok(self.docs.get(path).map(|entry| entry.value().clone()))
    }

    async fn set(&self, path: &str, doc: Document) -> Result<(), StoreError> {
        self.take_injected_failure()?;
        let now = Utc::now().to_rfc3339();
        self.docs.insert(path.to_string(), resolve_document(doc, &now));
        Ok(())
    }

    async fn merge(&self, path: &str, doc: Document) -> Result<(), StoreError> {
        self.take_injected_failure()?;
        let now = Utc::now().to_rfc3339();
        let resolved = resolve_document(doc, &now);
        match self.docs.entry(path.to_string()) {
            Entry::Occupied(mut entry) => merge_into(entry.get_mut(), resolved),
            Entry::Vacant(entry) => {
                entry.insert(resolved);
            }
        }
        Ok(())
    }

    async fn merge_if(
        &self,
        path: &str,
        precondition: &Precondition,
        doc: Document,
    ) -> Result<TxnOutcome, StoreError> {
        self.take_injected_failure()?;
        let now = Utc::now().to_rfc3339();
        match self.docs.entry(path.to_string()) {
            Entry::Occupied(mut entry) => {
                if !precondition.holds(entry.get()) {
                    return Ok(TxnOutcome::ConditionFailed);
                }
                merge_into(entry.get_mut(), resolve_document(doc, &now));
                Ok(TxnOutcome::Applied)
            }
            Entry::Vacant(_) => Ok(TxnOutcome::NotFound),
        }
    }
}
