//! Key-value persistence.
//!
//! Two independent mediums are exposed: a general string-keyed store for
//! profile fields, preferences and favorites, and a secret store for
//! credentials. Backends only move strings around and report every failure;
//! the [`Storage`] and [`SecureStorage`] adapters apply the failure policy
//! the rest of the crate relies on:
//!
//! * writes report errors to the caller,
//! * reads and deletes log errors and degrade to "absent" / no-op,
//! * typed values that fail to decode are treated as absent.

mod keys;
mod memory_store;
mod secret_store;
mod sqlite_store;

pub use keys::{favorites_key, StorageKey, PROFILE_KEYS};
pub use memory_store::InMemoryStore;
pub use secret_store::{KeyringSecretStore, SqliteSecretStore};
pub use sqlite_store::SqliteKeyValueStore;

use anyhow::{Context, Result};
use async_trait::async_trait;
use std::sync::Arc;
use tracing::{error, warn};

/// General-purpose asynchronous string-keyed medium.
#[async_trait]
pub trait KeyValueBackend: Send + Sync {
    /// Stores `value` under `key`, replacing any previous value.
    async fn set(&self, key: &str, value: &str) -> Result<()>;

    /// Returns the value stored under `key`.
    /// Returns Ok(None) if the key does not exist.
    async fn get(&self, key: &str) -> Result<Option<String>>;

    /// Removes `key`. Removing a missing key is not an error.
    async fn remove(&self, key: &str) -> Result<()>;

    /// Wipes every key.
    async fn clear(&self) -> Result<()>;
}

/// Medium with stronger access protection, used for credentials.
#[async_trait]
pub trait SecretBackend: Send + Sync {
    async fn set_secret(&self, key: &str, value: &str) -> Result<()>;

    /// Returns Ok(None) if no secret is stored under `key`.
    async fn get_secret(&self, key: &str) -> Result<Option<String>>;

    /// Deleting a missing secret is not an error.
    async fn delete_secret(&self, key: &str) -> Result<()>;
}

/// A value with an explicit string form in the general medium.
pub trait StoredRecord: Sized {
    fn encode(&self) -> Result<String>;
    fn decode(raw: &str) -> Result<Self>;
}

/// General medium adapter.
#[derive(Clone)]
pub struct Storage {
    backend: Arc<dyn KeyValueBackend>,
}

impl Storage {
    pub fn new(backend: Arc<dyn KeyValueBackend>) -> Self {
        Self { backend }
    }

    pub async fn set_item(&self, key: &str, value: &str) -> Result<()> {
        self.backend.set(key, value).await.map_err(|err| {
            error!("Error saving {} to storage: {:#}", key, err);
            err
        })
    }

    pub async fn get_item(&self, key: &str) -> Option<String> {
        match self.backend.get(key).await {
            Ok(value) => value,
            Err(err) => {
                error!("Error getting {} from storage: {:#}", key, err);
                None
            }
        }
    }

    pub async fn remove_item(&self, key: &str) {
        if let Err(err) = self.backend.remove(key).await {
            error!("Error removing {} from storage: {:#}", key, err);
        }
    }

    pub async fn clear(&self) {
        if let Err(err) = self.backend.clear().await {
            error!("Error clearing storage: {:#}", err);
        }
    }

    pub async fn set_record<R: StoredRecord>(&self, key: &str, record: &R) -> Result<()> {
        let raw = record
            .encode()
            .with_context(|| format!("Failed to encode value for {}", key))?;
        self.set_item(key, &raw).await
    }

    /// Reads and decodes the value under `key`. Missing, unreadable and
    /// malformed values all come back as `None`.
    pub async fn get_record<R: StoredRecord>(&self, key: &str) -> Option<R> {
        let raw = self.get_item(key).await?;
        match R::decode(&raw) {
            Ok(record) => Some(record),
            Err(err) => {
                warn!("Discarding malformed value stored under {}: {:#}", key, err);
                None
            }
        }
    }
}

/// Secret medium adapter.
#[derive(Clone)]
pub struct SecureStorage {
    backend: Arc<dyn SecretBackend>,
}

impl SecureStorage {
    pub fn new(backend: Arc<dyn SecretBackend>) -> Self {
        Self { backend }
    }

    pub async fn set_item(&self, key: &str, value: &str) -> Result<()> {
        self.backend.set_secret(key, value).await.map_err(|err| {
            error!("Error saving {} to secure storage: {:#}", key, err);
            err
        })
    }

    pub async fn get_item(&self, key: &str) -> Option<String> {
        match self.backend.get_secret(key).await {
            Ok(value) => value,
            Err(err) => {
                error!("Error getting {} from secure storage: {:#}", key, err);
                None
            }
        }
    }

    pub async fn remove_item(&self, key: &str) {
        if let Err(err) = self.backend.delete_secret(key).await {
            error!("Error removing {} from secure storage: {:#}", key, err);
        }
    }
}
