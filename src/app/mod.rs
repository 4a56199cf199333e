mod context;

pub use context::{AppContext, AppServices, FavoriteChange};

use anyhow::Result;
use std::sync::Arc;
use tracing::info;

use crate::auth::DummyJsonAuthClient;
use crate::config::{AppConfig, SecretBackendKind};
use crate::storage::{
    InMemoryStore, KeyringSecretStore, SecretBackend, SecureStorage, SqliteKeyValueStore,
    SqliteSecretStore, Storage,
};

impl AppServices {
    /// Opens the storage files under the data directory and builds the
    /// HTTP auth client.
    pub fn from_config(config: &AppConfig) -> Result<Self> {
        info!("Opening storage at {:?}...", config.storage_db_path());
        let storage = Storage::new(Arc::new(SqliteKeyValueStore::new(
            config.storage_db_path(),
        )?));

        let secret_backend: Arc<dyn SecretBackend> = match config.secret_backend {
            SecretBackendKind::Keyring => {
                info!("Using OS keyring service '{}'", config.keyring_service);
                Arc::new(KeyringSecretStore::new(config.keyring_service.clone()))
            }
            SecretBackendKind::File => {
                info!("Opening secret storage at {:?}...", config.secrets_db_path());
                Arc::new(SqliteSecretStore::new(config.secrets_db_path())?)
            }
            SecretBackendKind::Memory => Arc::new(InMemoryStore::new()),
        };

        let auth = DummyJsonAuthClient::new(&config.auth_base_url, config.request_timeout_sec)?;

        Ok(Self {
            storage,
            secrets: SecureStorage::new(secret_backend),
            auth: Arc::new(auth),
        })
    }
}
