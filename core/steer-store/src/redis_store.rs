//! Redis-backed condition store.
//!
//! Uses a [`ConnectionManager`], which multiplexes one connection across all
//! callers and reconnects after the link drops. `rediss://` URLs use TLS.

use async_trait::async_trait;
use redis::aio::ConnectionManager;
use redis::{AsyncCommands, ErrorKind, RedisError};
use steer_types::{ConditionRecord, UserId};
use tracing::{debug, info};

use crate::{decode, encode, storage_key, ConditionStore, StoreError, StoreResult};

/// Networked condition store backed by Redis.
#[derive(Clone)]
pub struct RedisConditionStore {
    conn: ConnectionManager,
    prefix: String,
}

impl RedisConditionStore {
    /// Connects to the server at `url`.
    pub async fn connect(url: &str) -> StoreResult<Self> {
        let client = redis::Client::open(url)
            .map_err(|e| StoreError::Unavailable(format!("invalid redis url: {e}")))?;
        let conn = ConnectionManager::new(client)
            .await
            .map_err(|e| StoreError::Unavailable(format!("failed to connect to redis: {e}")))?;
        info!("connected to redis condition store");
        Ok(Self {
            conn,
            prefix: String::new(),
        })
    }

    /// Namespaces every key with `prefix`.
    #[must_use]
    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self
    }
}

/// A non-string value under the key is a corrupt record; anything else is the
/// engine being unreachable.
fn map_redis_error(id: &UserId, err: RedisError) -> StoreError {
    if err.kind() == ErrorKind::TypeError {
        StoreError::Deserialization {
            key: id.to_string(),
            reason: err.to_string(),
        }
    } else {
        StoreError::Unavailable(err.to_string())
    }
}

#[async_trait]
impl ConditionStore for RedisConditionStore {
    async fn put(&self, id: &UserId, record: &ConditionRecord) -> StoreResult<()> {
        let text = encode(id, record)?;
        let key = storage_key(&self.prefix, id);
        debug!(%key, "redis SET");
        let mut conn = self.conn.clone();
        conn.set::<_, _, ()>(&key, text)
            .await
            .map_err(|e| map_redis_error(id, e))
    }

    async fn get(&self, id: &UserId) -> StoreResult<ConditionRecord> {
        let key = storage_key(&self.prefix, id);
        debug!(%key, "redis GET");
        let mut conn = self.conn.clone();
        let text: Option<String> = conn.get(&key).await.map_err(|e| map_redis_error(id, e))?;
        match text {
            Some(text) => decode(id, &text),
            None => Err(StoreError::NotFound(id.to_string())),
        }
    }

    fn backend(&self) -> &'static str {
        "redis"
    }
}
