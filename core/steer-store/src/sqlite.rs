//! SQLite-backed condition store.
//!
//! Uses a single key/value table. Every call runs on the blocking pool and
//! holds the connection lock only for the duration of one statement.

use async_trait::async_trait;
use rusqlite::{params, Connection, OptionalExtension};
use std::path::Path;
use std::sync::{Arc, Mutex};
use steer_types::{ConditionRecord, UserId};
use tracing::{debug, info};

use crate::{decode, encode, storage_key, ConditionStore, StoreError, StoreResult};

/// Durable condition store backed by SQLite.
#[derive(Clone)]
pub struct SqliteConditionStore {
    conn: Arc<Mutex<Connection>>,
    prefix: String,
}

impl SqliteConditionStore {
    /// Opens (or creates) a store at the given path.
    pub fn open(path: impl AsRef<Path>) -> StoreResult<Self> {
        let path = path.as_ref();
        let conn = Connection::open(path).map_err(|e| {
            StoreError::Unavailable(format!("failed to open {}: {e}", path.display()))
        })?;
        info!(path = %path.display(), "opened sqlite condition store");
        Self::from_connection(conn)
    }

    /// Opens an in-memory store (for testing).
    pub fn open_in_memory() -> StoreResult<Self> {
        let conn = Connection::open_in_memory()
            .map_err(|e| StoreError::Unavailable(format!("failed to open in-memory store: {e}")))?;
        Self::from_connection(conn)
    }

    fn from_connection(conn: Connection) -> StoreResult<Self> {
        conn.execute_batch(
            "
            CREATE TABLE IF NOT EXISTS conditions (
                key TEXT PRIMARY KEY,
                value TEXT NOT NULL
            );
            ",
        )
        .map_err(|e| StoreError::Unavailable(format!("failed to init schema: {e}")))?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
            prefix: String::new(),
        })
    }

    /// Namespaces every key with `prefix`.
    #[must_use]
    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self
    }

    /// Stores raw text under `id`, bypassing encoding.
    pub async fn put_raw(&self, id: &UserId, text: impl Into<String>) -> StoreResult<()> {
        let key = storage_key(&self.prefix, id);
        let text = text.into();
        self.write(key, text).await
    }

    async fn write(&self, key: String, text: String) -> StoreResult<()> {
        let conn = Arc::clone(&self.conn);
        tokio::task::spawn_blocking(move || {
            let conn = conn
                .lock()
                .map_err(|_| StoreError::Unavailable("sqlite connection poisoned".into()))?;
            conn.execute(
                "INSERT INTO conditions (key, value) VALUES (?1, ?2)
                 ON CONFLICT(key) DO UPDATE SET value = excluded.value",
                params![key, text],
            )
            .map_err(|e| StoreError::Unavailable(format!("failed to write {key}: {e}")))?;
            Ok(())
        })
        .await
        .map_err(|e| StoreError::Unavailable(format!("sqlite task failed: {e}")))?
    }

    async fn read(&self, key: String) -> StoreResult<Option<String>> {
        let conn = Arc::clone(&self.conn);
        tokio::task::spawn_blocking(move || {
            let conn = conn
                .lock()
                .map_err(|_| StoreError::Unavailable("sqlite connection poisoned".into()))?;
            conn.query_row(
                "SELECT value FROM conditions WHERE key = ?1",
                params![key],
                |row| row.get::<_, String>(0),
            )
            .optional()
            .map_err(|e| StoreError::Unavailable(format!("failed to read {key}: {e}")))
        })
        .await
        .map_err(|e| StoreError::Unavailable(format!("sqlite task failed: {e}")))?
    }
}

#[async_trait]
impl ConditionStore for SqliteConditionStore {
    async fn put(&self, id: &UserId, record: &ConditionRecord) -> StoreResult<()> {
        let text = encode(id, record)?;
        let key = storage_key(&self.prefix, id);
        debug!(%key, "sqlite put");
        self.write(key, text).await
    }

    async fn get(&self, id: &UserId) -> StoreResult<ConditionRecord> {
        let key = storage_key(&self.prefix, id);
        debug!(%key, "sqlite get");
        match self.read(key).await? {
            Some(text) => decode(id, &text),
            None => Err(StoreError::NotFound(id.to_string())),
        }
    }

    fn backend(&self) -> &'static str {
        "sqlite"
    }
}
