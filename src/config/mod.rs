mod file_config;

pub use file_config::{AuthConfig, FileConfig, TmdbConfig};

use anyhow::{anyhow, bail, Context, Result};
use clap::ValueEnum;
use std::path::PathBuf;

use crate::auth::DEFAULT_AUTH_BASE_URL;
use crate::catalog::{
    TmdbSettings, DEFAULT_BACKDROP_BASE_URL, DEFAULT_POSTER_BASE_URL, DEFAULT_TMDB_BASE_URL,
};
use crate::theme::ThemeMode;

pub const DEFAULT_DATA_DIR: &str = ".streambox";
pub const DEFAULT_KEYRING_SERVICE: &str = "streambox";
pub const DEFAULT_REQUEST_TIMEOUT_SEC: u64 = 30;

/// Where the auth token is kept.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum SecretBackendKind {
    /// Operating system credential store.
    #[default]
    Keyring,
    /// Owner-only SQLite file inside the data directory.
    File,
    /// Process memory; nothing survives exit.
    Memory,
}

/// CLI arguments that can be overridden by the TOML config.
#[derive(Debug, Clone)]
pub struct CliConfig {
    pub data_dir: Option<PathBuf>,
    pub tmdb_api_key: Option<String>,
    pub tmdb_base_url: Option<String>,
    pub tmdb_image_base_url: Option<String>,
    pub tmdb_backdrop_base_url: Option<String>,
    pub auth_base_url: Option<String>,
    pub request_timeout_sec: u64,
    pub secret_backend: SecretBackendKind,
    pub keyring_service: Option<String>,
    pub default_theme: ThemeMode,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            data_dir: None,
            tmdb_api_key: None,
            tmdb_base_url: None,
            tmdb_image_base_url: None,
            tmdb_backdrop_base_url: None,
            auth_base_url: None,
            request_timeout_sec: DEFAULT_REQUEST_TIMEOUT_SEC,
            secret_backend: SecretBackendKind::default(),
            keyring_service: None,
            default_theme: ThemeMode::default(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub data_dir: PathBuf,
    pub tmdb_api_key: Option<String>,
    pub tmdb_base_url: String,
    pub tmdb_image_base_url: String,
    pub tmdb_backdrop_base_url: String,
    pub auth_base_url: String,
    pub request_timeout_sec: u64,
    pub secret_backend: SecretBackendKind,
    pub keyring_service: String,
    pub default_theme: ThemeMode,
}

impl AppConfig {
    /// Resolve configuration from CLI arguments and optional TOML file config.
    /// TOML values override CLI values where present.
    pub fn resolve(cli: &CliConfig, file_config: Option<FileConfig>) -> Result<Self> {
        let file = file_config.unwrap_or_default();
        let tmdb = file.tmdb.unwrap_or_default();
        let auth = file.auth.unwrap_or_default();

        let data_dir = file
            .data_dir
            .map(PathBuf::from)
            .or_else(|| cli.data_dir.clone())
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_DIR));

        if !data_dir.exists() {
            std::fs::create_dir_all(&data_dir)
                .with_context(|| format!("Failed to create data directory: {:?}", data_dir))?;
        }
        if !data_dir.is_dir() {
            bail!("data_dir is not a directory: {:?}", data_dir);
        }

        let secret_backend = match file.secret_backend {
            Some(value) => SecretBackendKind::from_str(&value, true)
                .map_err(|_| anyhow!("Invalid secret_backend in config file: {}", value))?,
            None => cli.secret_backend,
        };

        let default_theme = match file.default_theme {
            Some(value) => value.parse()?,
            None => cli.default_theme,
        };

        let request_timeout_sec = file.request_timeout_sec.unwrap_or(cli.request_timeout_sec);
        if request_timeout_sec == 0 {
            bail!("request_timeout_sec must be greater than zero");
        }

        Ok(Self {
            data_dir,
            tmdb_api_key: tmdb
                .api_key
                .or_else(|| cli.tmdb_api_key.clone())
                .filter(|key| !key.trim().is_empty()),
            tmdb_base_url: tmdb
                .base_url
                .or_else(|| cli.tmdb_base_url.clone())
                .unwrap_or_else(|| DEFAULT_TMDB_BASE_URL.to_string()),
            tmdb_image_base_url: tmdb
                .image_base_url
                .or_else(|| cli.tmdb_image_base_url.clone())
                .unwrap_or_else(|| DEFAULT_POSTER_BASE_URL.to_string()),
            tmdb_backdrop_base_url: tmdb
                .backdrop_base_url
                .or_else(|| cli.tmdb_backdrop_base_url.clone())
                .unwrap_or_else(|| DEFAULT_BACKDROP_BASE_URL.to_string()),
            auth_base_url: auth
                .base_url
                .or_else(|| cli.auth_base_url.clone())
                .unwrap_or_else(|| DEFAULT_AUTH_BASE_URL.to_string()),
            request_timeout_sec,
            secret_backend,
            keyring_service: file
                .keyring_service
                .or_else(|| cli.keyring_service.clone())
                .unwrap_or_else(|| DEFAULT_KEYRING_SERVICE.to_string()),
            default_theme,
        })
    }

    pub fn storage_db_path(&self) -> PathBuf {
        self.data_dir.join("storage.db")
    }

    pub fn secrets_db_path(&self) -> PathBuf {
        self.data_dir.join("secrets.db")
    }

    /// Catalog client settings. Fails if no API key is configured.
    pub fn tmdb_settings(&self) -> Result<TmdbSettings> {
        let api_key = self.tmdb_api_key.clone().ok_or_else(|| {
            anyhow!(
                "TMDB API key must be specified via --tmdb-api-key, TMDB_API_KEY or in config file"
            )
        })?;

        Ok(TmdbSettings {
            api_key,
            base_url: self.tmdb_base_url.clone(),
            poster_base_url: self.tmdb_image_base_url.clone(),
            backdrop_base_url: self.tmdb_backdrop_base_url.clone(),
            timeout_sec: self.request_timeout_sec,
        })
    }
}
