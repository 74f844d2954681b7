//! In-process condition store.

use async_trait::async_trait;
use std::collections::HashMap;
use steer_types::{ConditionRecord, UserId};
use tokio::sync::RwLock;
use tracing::debug;

use crate::{decode, encode, storage_key, ConditionStore, StoreError, StoreResult};

/// Condition store backed by a process-local map.
///
/// Values are kept as encoded JSON text so that reads go through the same
/// decoding path as the networked backends.
#[derive(Debug, Default)]
pub struct MemoryConditionStore {
    entries: RwLock<HashMap<String, String>>,
    prefix: String,
}

impl MemoryConditionStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Namespaces every key with `prefix`.
    #[must_use]
    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self
    }

    /// Stores raw text under `id`, bypassing encoding.
    pub async fn put_raw(&self, id: &UserId, text: impl Into<String>) {
        let key = storage_key(&self.prefix, id);
        self.entries.write().await.insert(key, text.into());
    }

    /// Returns the raw text stored under `id`, if any.
    pub async fn get_raw(&self, id: &UserId) -> Option<String> {
        let key = storage_key(&self.prefix, id);
        self.entries.read().await.get(&key).cloned()
    }

    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }
}

#[async_trait]
impl ConditionStore for MemoryConditionStore {
    async fn put(&self, id: &UserId, record: &ConditionRecord) -> StoreResult<()> {
        let text = encode(id, record)?;
        let key = storage_key(&self.prefix, id);
        debug!(%key, "memory put");
        self.entries.write().await.insert(key, text);
        Ok(())
    }

    async fn get(&self, id: &UserId) -> StoreResult<ConditionRecord> {
        let key = storage_key(&self.prefix, id);
        debug!(%key, "memory get");
        let text = self
            .entries
            .read()
            .await
            .get(&key)
            .cloned()
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;
        decode(id, &text)
    }

    fn backend(&self) -> &'static str {
        "memory"
    }
}
