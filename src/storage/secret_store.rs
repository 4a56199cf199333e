use super::{KeyValueBackend, SecretBackend, SqliteKeyValueStore};
use anyhow::{Context, Result};
use async_trait::async_trait;
use std::path::Path;
use tracing::debug;

/// Secret medium backed by the operating system's credential store
/// (Keychain, Credential Manager, kernel keyutils).
pub struct KeyringSecretStore {
    service_name: String,
}

impl KeyringSecretStore {
    pub fn new(service_name: impl Into<String>) -> Self {
        Self {
            service_name: service_name.into(),
        }
    }

    fn entry(&self, key: &str) -> Result<keyring::Entry> {
        keyring::Entry::new(&self.service_name, key)
            .with_context(|| format!("Failed to open keyring entry {}", key))
    }
}

#[async_trait]
impl SecretBackend for KeyringSecretStore {
    async fn set_secret(&self, key: &str, value: &str) -> Result<()> {
        self.entry(key)?
            .set_password(value)
            .with_context(|| format!("Failed to store {} in keyring", key))
    }

    async fn get_secret(&self, key: &str) -> Result<Option<String>> {
        match self.entry(key)?.get_password() {
            Ok(value) => Ok(Some(value)),
            Err(keyring::Error::NoEntry) => Ok(None),
            Err(err) => Err(err).with_context(|| format!("Failed to read {} from keyring", key)),
        }
    }

    async fn delete_secret(&self, key: &str) -> Result<()> {
        match self.entry(key)?.delete_credential() {
            Ok(()) | Err(keyring::Error::NoEntry) => Ok(()),
            Err(err) => Err(err).with_context(|| format!("Failed to delete {} from keyring", key)),
        }
    }
}

/// Secret medium for hosts without a usable keyring: a dedicated SQLite
/// file that only its owner can read or write.
pub struct SqliteSecretStore {
    inner: SqliteKeyValueStore,
}

impl SqliteSecretStore {
    pub fn new<T: AsRef<Path>>(db_path: T) -> Result<Self> {
        let db_path = db_path.as_ref();
        let inner = SqliteKeyValueStore::new(db_path)?;
        restrict_to_owner(db_path)?;
        debug!("Opened file secret storage at {:?}", db_path);
        Ok(Self { inner })
    }
}

#[cfg(unix)]
fn restrict_to_owner(path: &Path) -> Result<()> {
    use std::os::unix::fs::PermissionsExt;
    std::fs::set_permissions(path, std::fs::Permissions::from_mode(0o600))
        .with_context(|| format!("Failed to restrict permissions of {:?}", path))
}

#[cfg(not(unix))]
fn restrict_to_owner(_path: &Path) -> Result<()> {
    Ok(())
}

#[async_trait]
impl SecretBackend for SqliteSecretStore {
    async fn set_secret(&self, key: &str, value: &str) -> Result<()> {
        self.inner.set(key, value).await
    }

    async fn get_secret(&self, key: &str) -> Result<Option<String>> {
        self.inner.get(key).await
    }

    async fn delete_secret(&self, key: &str) -> Result<()> {
        self.inner.remove(key).await
    }
}
