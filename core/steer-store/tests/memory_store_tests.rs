mod common;

use std::sync::Arc;
use steer_store::{ConditionStore, MemoryConditionStore, StoreError};
use steer_types::{ConditionRecord, UserId};

#[tokio::test]
async fn roundtrip() {
    common::put_then_get_roundtrips(&MemoryConditionStore::new()).await;
}

#[tokio::test]
async fn partial_roundtrip() {
    common::partial_record_roundtrips(&MemoryConditionStore::new()).await;
}

#[tokio::test]
async fn unknown_user_not_found() {
    common::get_unknown_is_not_found(&MemoryConditionStore::new()).await;
}

#[tokio::test]
async fn full_replace() {
    common::put_replaces_whole_record(&MemoryConditionStore::new()).await;
}

#[tokio::test]
async fn key_mismatch() {
    common::put_rejects_foreign_record(&MemoryConditionStore::new()).await;
}

#[tokio::test]
async fn isolation() {
    common::users_are_isolated(&MemoryConditionStore::new()).await;
}

#[tokio::test]
async fn backend_name() {
    assert_eq!(MemoryConditionStore::new().backend(), "memory");
}

#[tokio::test]
async fn stores_json_text() {
    let store = MemoryConditionStore::new();
    let id = UserId::new("u1");
    store
        .put(&id, &ConditionRecord::new(id.clone()).with_min(3))
        .await
        .unwrap();
    assert_eq!(
        store.get_raw(&id).await.as_deref(),
        Some(r#"{"min":3,"userId":"u1"}"#)
    );
}

#[tokio::test]
async fn stored_text_matches_record_encoding() {
    let store = MemoryConditionStore::new();
    let id = UserId::new("u1");
    let record = ConditionRecord::new(id.clone())
        .with_contains("dragon")
        .with_max(40);
    store.put(&id, &record).await.unwrap();
    assert_eq!(store.get_raw(&id).await, Some(record.to_json().unwrap()));

    let other = UserId::new("u2");
    let written = ConditionRecord::new(other.clone()).with_min(2);
    store.put_raw(&other, written.to_json().unwrap()).await;
    assert_eq!(store.get(&other).await.unwrap(), written);
}

#[tokio::test]
async fn corrupt_value_is_deserialization_error() {
    let store = MemoryConditionStore::new();
    let id = UserId::new("u1");
    store.put_raw(&id, "{not json").await;
    let err = store.get(&id).await.unwrap_err();
    assert!(matches!(err, StoreError::Deserialization { ref key, .. } if key == "u1"));
}

#[tokio::test]
async fn wrong_field_type_is_deserialization_error() {
    let store = MemoryConditionStore::new();
    let id = UserId::new("u1");
    store.put_raw(&id, r#"{"min":"three","userId":"u1"}"#).await;
    assert!(matches!(
        store.get(&id).await,
        Err(StoreError::Deserialization { .. })
    ));
}

#[tokio::test]
async fn record_stored_under_wrong_key_is_deserialization_error() {
    let store = MemoryConditionStore::new();
    let id = UserId::new("u1");
    store.put_raw(&id, r#"{"userId":"someone-else"}"#).await;
    let err = store.get(&id).await.unwrap_err();
    assert!(err.to_string().contains("someone-else"));
}

#[tokio::test]
async fn prefix_namespaces_keys() {
    let store = MemoryConditionStore::new().with_prefix("conditions:");
    let id = UserId::new("u1");
    store.put(&id, &ConditionRecord::new(id.clone())).await.unwrap();
    assert_eq!(store.len().await, 1);
    assert!(store.get_raw(&id).await.is_some());
    assert!(store.get(&id).await.is_ok());
}

#[tokio::test]
async fn new_store_is_empty() {
    let store = MemoryConditionStore::new();
    assert!(store.is_empty().await);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_writers_leave_one_complete_record() {
    let store = Arc::new(MemoryConditionStore::new());
    let id = UserId::new("shared");

    let mut handles = Vec::new();
    for i in 0..32i64 {
        let store = Arc::clone(&store);
        let id = id.clone();
        handles.push(tokio::spawn(async move {
            let record = ConditionRecord::new(id.clone())
                .with_min(i)
                .with_max(i + 100)
                .with_contains(format!("n{i}"));
            store.put(&id, &record).await.unwrap();
        }));
    }
    for handle in handles {
        handle.await.unwrap();
    }

    let record = store.get(&id).await.unwrap();
    let min = record.min.unwrap();
    assert_eq!(record.max, Some(min + 100));
    assert_eq!(record.contains, Some(format!("n{min}")));
}
