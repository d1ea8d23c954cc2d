use cafestock_core::document::{Document, Sentinel, Value};
use cafestock_core::sanitize::MissingPolicy;
use cafestock_core::store::{DocumentStore, InMemoryStore, Precondition, StoreError, TxnOutcome};
use cafestock_core::writer::{SanitizingWriter, UPDATED_AT_FIELD};
use std::sync::Arc;

fn dirty_document() -> Document {
    Document::from([
        ("name".to_string(), Value::from("house blend")),
        ("stock".to_string(), Value::Number(f64::NAN)),
        ("target".to_string(), Value::Missing),
        ("price".to_string(), Value::Number(f64::INFINITY)),
        (
            "history".to_string(),
            Value::Array(vec![Value::Number(2.0), Value::Missing]),
        ),
        (
            "receivedAt".to_string(),
            Value::Sentinel(Sentinel::ServerTimestamp),
        ),
    ])
}

fn assert_storable(value: &Value) {
    match value {
        Value::Missing => panic!("missing sentinel reached the store"),
        Value::Number(n) => assert!(n.is_finite(), "non-finite number reached the store"),
        Value::Array(items) => items.iter().for_each(assert_storable),
        Value::Map(doc) => doc.values().for_each(assert_storable),
        _ => {}
    }
}

#[tokio::test]
async fn store_never_receives_unrepresentable_values() {
    for policy in [MissingPolicy::Drop, MissingPolicy::Null] {
        let store = Arc::new(InMemoryStore::new());
        let writer = SanitizingWriter::new(store.clone(), policy);

        writer
            .safe_write("items/house-blend", &dirty_document())
            .await
            .unwrap();

        let stored = store.get("items/house-blend").await.unwrap().unwrap();
        stored.values().for_each(assert_storable);
        // Sentinels were resolved, not dropped.
        assert!(matches!(stored.get("receivedAt"), Some(Value::String(_))));
        assert!(matches!(stored.get(UPDATED_AT_FIELD), Some(Value::String(_))));
    }
}

#[tokio::test]
async fn policy_controls_missing_field_shape() {
    let store = Arc::new(InMemoryStore::new());
    let null_writer = SanitizingWriter::new(store.clone(), MissingPolicy::Null);
    let drop_writer = SanitizingWriter::new(store.clone(), MissingPolicy::Drop);

    null_writer.safe_write("a", &dirty_document()).await.unwrap();
    drop_writer.safe_write("b", &dirty_document()).await.unwrap();

    let nulled = store.get("a").await.unwrap().unwrap();
    assert_eq!(nulled.get("target"), Some(&Value::Null));

    let dropped = store.get("b").await.unwrap().unwrap();
    assert!(!dropped.contains_key("target"));
}

#[tokio::test]
async fn safe_write_uses_merge_semantics() {
    let store = Arc::new(InMemoryStore::new());
    let writer = SanitizingWriter::with_default_policy(store.clone());

    writer
        .safe_write(
            "items/beans",
            &Document::from([
                ("name".to_string(), Value::from("beans")),
                ("stock".to_string(), Value::Number(4.0)),
            ]),
        )
        .await
        .unwrap();
    writer
        .safe_write(
            "items/beans",
            &Document::from([("stock".to_string(), Value::Number(9.0))]),
        )
        .await
        .unwrap();

    let stored = store.get("items/beans").await.unwrap().unwrap();
    assert_eq!(stored.get("name"), Some(&Value::from("beans")));
    assert_eq!(stored.get("stock"), Some(&Value::Number(9.0)));
}

#[tokio::test]
async fn conditional_write_reports_outcomes() {
    let store = Arc::new(InMemoryStore::new());
    let writer = SanitizingWriter::with_default_policy(store.clone());

    writer
        .safe_write(
            "po/1",
            &Document::from([("status".to_string(), Value::from("draft"))]),
        )
        .await
        .unwrap();

    let pre = Precondition::field_equals("status", "draft");
    let patch = Document::from([("status".to_string(), Value::from("ordered"))]);

    assert_eq!(
        writer.safe_write_if("po/1", &pre, &patch).await.unwrap(),
        TxnOutcome::Applied
    );
    assert_eq!(
        writer.safe_write_if("po/1", &pre, &patch).await.unwrap(),
        TxnOutcome::ConditionFailed
    );
    assert_eq!(
        writer.safe_write_if("po/2", &pre, &patch).await.unwrap(),
        TxnOutcome::NotFound
    );
}

#[tokio::test]
async fn store_rejection_surfaces_with_classification() {
    let store = Arc::new(InMemoryStore::new());
    let writer = SanitizingWriter::with_default_policy(store.clone());

    store.fail_next(StoreError::permission_denied("rules rejected write"));
    let err = writer
        .safe_write("po/1", &Document::new())
        .await
        .unwrap_err();
    assert!(!err.is_transient());

    store.fail_next(StoreError::unavailable("deadline exceeded"));
    let err = writer
        .safe_write("po/1", &Document::new())
        .await
        .unwrap_err();
    assert!(err.is_transient());
}
