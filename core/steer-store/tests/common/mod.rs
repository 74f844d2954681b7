//! Contract checks shared by every backend's tests.

#![allow(dead_code)]

use pretty_assertions::assert_eq;
use steer_store::{ConditionStore, StoreError};
use steer_types::{ConditionRecord, UserId};

pub fn cat_record(id: &UserId) -> ConditionRecord {
    ConditionRecord::new(id.clone())
        .with_contains("cat")
        .with_min(3)
        .with_max(10)
}

pub async fn put_then_get_roundtrips(store: &dyn ConditionStore) {
    let id = UserId::issue();
    let record = cat_record(&id);
    store.put(&id, &record).await.unwrap();
    assert_eq!(store.get(&id).await.unwrap(), record);
}

pub async fn partial_record_roundtrips(store: &dyn ConditionStore) {
    let id = UserId::issue();
    let record = ConditionRecord::new(id.clone()).with_max(4);
    store.put(&id, &record).await.unwrap();
    let back = store.get(&id).await.unwrap();
    assert_eq!(back, record);
    assert_eq!(back.min, None);
    assert_eq!(back.contains, None);
}

pub async fn get_unknown_is_not_found(store: &dyn ConditionStore) {
    let id = UserId::issue();
    let err = store.get(&id).await.unwrap_err();
    assert!(matches!(err, StoreError::NotFound(ref key) if key == id.as_str()));
}

pub async fn put_replaces_whole_record(store: &dyn ConditionStore) {
    let id = UserId::issue();
    store.put(&id, &cat_record(&id)).await.unwrap();

    let replacement = ConditionRecord::new(id.clone()).with_contains("dog");
    store.put(&id, &replacement).await.unwrap();

    let back = store.get(&id).await.unwrap();
    assert_eq!(back, replacement);
    assert_eq!(back.min, None, "fields from the old record must not survive");
}

pub async fn put_rejects_foreign_record(store: &dyn ConditionStore) {
    let id = UserId::issue();
    let other = UserId::issue();
    let err = store.put(&id, &cat_record(&other)).await.unwrap_err();
    assert!(matches!(err, StoreError::KeyMismatch { .. }));
    assert!(matches!(store.get(&id).await, Err(StoreError::NotFound(_))));
}

pub async fn users_are_isolated(store: &dyn ConditionStore) {
    let a = UserId::issue();
    let b = UserId::issue();
    store.put(&a, &cat_record(&a)).await.unwrap();
    store
        .put(&b, &ConditionRecord::new(b.clone()).with_min(1))
        .await
        .unwrap();
    assert_eq!(store.get(&a).await.unwrap().contains.as_deref(), Some("cat"));
    assert_eq!(store.get(&b).await.unwrap().contains, None);
}
