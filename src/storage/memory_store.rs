use super::{KeyValueBackend, SecretBackend};
use anyhow::{anyhow, bail, Result};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, MutexGuard};

/// Process-local backend for both mediums. Nothing survives the process.
///
/// Reads and writes can be made to fail on demand, which is how the
/// degrade-to-absent policy of the adapters gets exercised.
#[derive(Default)]
pub struct InMemoryStore {
    entries: Mutex<HashMap<String, String>>,
    secrets: Mutex<HashMap<String, String>>,
    fail_reads: AtomicBool,
    fail_writes: AtomicBool,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_fail_reads(&self, fail: bool) {
        self.fail_reads.store(fail, Ordering::SeqCst);
    }

    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    fn check_read(&self) -> Result<()> {
        if self.fail_reads.load(Ordering::SeqCst) {
            bail!("in-memory store is failing reads");
        }
        Ok(())
    }

    fn check_write(&self) -> Result<()> {
        if self.fail_writes.load(Ordering::SeqCst) {
            bail!("in-memory store is failing writes");
        }
        Ok(())
    }
}

type Entries = HashMap<String, String>;

fn lock(map: &Mutex<Entries>) -> Result<MutexGuard<'_, Entries>> {
    map.lock().map_err(|_| anyhow!("in-memory store lock poisoned"))
}

#[async_trait]
impl KeyValueBackend for InMemoryStore {
    async fn set(&self, key: &str, value: &str) -> Result<()> {
        self.check_write()?;
        lock(&self.entries)?.insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn get(&self, key: &str) -> Result<Option<String>> {
        self.check_read()?;
        Ok(lock(&self.entries)?.get(key).cloned())
    }

    async fn remove(&self, key: &str) -> Result<()> {
        self.check_write()?;
        lock(&self.entries)?.remove(key);
        Ok(())
    }

    async fn clear(&self) -> Result<()> {
        self.check_write()?;
        lock(&self.entries)?.clear();
        Ok(())
    }
}

#[async_trait]
impl SecretBackend for InMemoryStore {
    async fn set_secret(&self, key: &str, value: &str) -> Result<()> {
        self.check_write()?;
        lock(&self.secrets)?.insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn get_secret(&self, key: &str) -> Result<Option<String>> {
        self.check_read()?;
        Ok(lock(&self.secrets)?.get(key).cloned())
    }

    async fn delete_secret(&self, key: &str) -> Result<()> {
        self.check_write()?;
        lock(&self.secrets)?.remove(key);
        Ok(())
    }
}
