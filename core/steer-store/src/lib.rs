//! Key-value persistence of condition records for steer.
//!
//! Each user's [`ConditionRecord`] is stored as JSON text under the user's id.
//! Writes replace the whole value in a single round trip; there are no
//! field-level updates and no cross-request locking, so concurrent writers
//! resolve as last-writer-wins.
//!
//! # Backends
//!
//! - [`MemoryConditionStore`]: process-local map, for development and tests
//! - [`SqliteConditionStore`]: single-file durable store
//! - [`RedisConditionStore`]: networked store over a multiplexed connection
//!
//! Handlers share one instance as `Arc<dyn ConditionStore>`.

mod error;
mod memory;
mod redis_store;
mod sqlite;

pub use error::{StoreError, StoreResult};
pub use memory::MemoryConditionStore;
pub use redis_store::RedisConditionStore;
pub use sqlite::SqliteConditionStore;

use async_trait::async_trait;
use steer_types::{ConditionRecord, UserId};

/// Persistence contract for condition records.
///
/// Implementations must be safe for concurrent use by many in-flight requests.
#[async_trait]
pub trait ConditionStore: Send + Sync + 'static {
    /// Stores `record` under `id`, replacing any previous value.
    async fn put(&self, id: &UserId, record: &ConditionRecord) -> StoreResult<()>;

    /// Loads the record stored under `id`.
    async fn get(&self, id: &UserId) -> StoreResult<ConditionRecord>;

    /// Short backend name for logs and health output.
    fn backend(&self) -> &'static str;
}

/// Builds the storage key for `id` under an optional namespace prefix.
pub(crate) fn storage_key(prefix: &str, id: &UserId) -> String {
    format!("{prefix}{id}")
}

/// Validates ownership and encodes a record for storage.
pub(crate) fn encode(id: &UserId, record: &ConditionRecord) -> StoreResult<String> {
    if record.user_id != *id {
        return Err(StoreError::KeyMismatch {
            key: id.to_string(),
            record_user: record.user_id.to_string(),
        });
    }
    record.to_json().map_err(StoreError::Serialization)
}

/// Decodes stored text, checking that it belongs to `id`.
pub(crate) fn decode(id: &UserId, text: &str) -> StoreResult<ConditionRecord> {
    let record = ConditionRecord::from_json(text).map_err(|e| StoreError::Deserialization {
        key: id.to_string(),
        reason: e.to_string(),
    })?;
    if record.user_id != *id {
        return Err(StoreError::Deserialization {
            key: id.to_string(),
            reason: format!("stored record belongs to {}", record.user_id),
        });
    }
    Ok(record)
}
