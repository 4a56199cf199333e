use super::KeyValueBackend;
use crate::sqlite_column;
use crate::sqlite_persistence::{
    open_versioned, Column, SqlType, Table, VersionedSchema, DEFAULT_TIMESTAMP,
};
use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use rusqlite::{params, Connection, OptionalExtension};
use std::path::Path;
use std::sync::{Arc, Mutex, MutexGuard};
use tracing::debug;

/// V 0
const KEY_VALUE_TABLE_V_0: Table = Table {
    name: "key_value",
    columns: &[
        sqlite_column!("key", &SqlType::Text, is_primary_key = true),
        sqlite_column!("value", &SqlType::Text, non_null = true),
        sqlite_column!(
            "updated",
            &SqlType::Integer,
            default_value = Some(DEFAULT_TIMESTAMP)
        ),
    ],
};

const VERSIONED_SCHEMAS: &[VersionedSchema] = &[VersionedSchema {
    version: 0,
    tables: &[KEY_VALUE_TABLE_V_0],
    migration: None,
}];

/// General medium backed by a single SQLite file.
#[derive(Clone)]
pub struct SqliteKeyValueStore {
    conn: Arc<Mutex<Connection>>,
}

impl SqliteKeyValueStore {
    pub fn new<T: AsRef<Path>>(db_path: T) -> Result<Self> {
        let db_path = db_path.as_ref();
        let is_new = !db_path.exists();
        let conn = Connection::open(db_path)
            .with_context(|| format!("Failed to open storage database {:?}", db_path))?;
        let conn = open_versioned(conn, is_new, VERSIONED_SCHEMAS)
            .with_context(|| format!("Invalid storage database {:?}", db_path))?;
        debug!("Opened key-value storage at {:?}", db_path);
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    fn conn(&self) -> Result<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|_| anyhow!("storage connection lock poisoned"))
    }
}

#[async_trait]
impl KeyValueBackend for SqliteKeyValueStore {
    async fn set(&self, key: &str, value: &str) -> Result<()> {
        self.conn()?
            .execute(
                &format!(
                    "INSERT INTO {} (key, value) VALUES (?1, ?2) \
                     ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated = {}",
                    KEY_VALUE_TABLE_V_0.name, DEFAULT_TIMESTAMP
                ),
                params![key, value],
            )
            .with_context(|| format!("Failed to write key {}", key))?;
        Ok(())
    }

    async fn get(&self, key: &str) -> Result<Option<String>> {
        self.conn()?
            .query_row(
                &format!(
                    "SELECT value FROM {} WHERE key = ?1",
                    KEY_VALUE_TABLE_V_0.name
                ),
                params![key],
                |row| row.get(0),
            )
            .optional()
            .with_context(|| format!("Failed to read key {}", key))
    }

    async fn remove(&self, key: &str) -> Result<()> {
        self.conn()?
            .execute(
                &format!("DELETE FROM {} WHERE key = ?1", KEY_VALUE_TABLE_V_0.name),
                params![key],
            )
            .with_context(|| format!("Failed to remove key {}", key))?;
        Ok(())
    }

    async fn clear(&self) -> Result<()> {
        self.conn()?
            .execute(&format!("DELETE FROM {}", KEY_VALUE_TABLE_V_0.name), [])
            .context("Failed to clear storage")?;
        Ok(())
    }
}
