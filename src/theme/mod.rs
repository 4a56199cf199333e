//! Light/dark appearance preference.

mod palette;

pub use palette::{Palette, DARK_PALETTE, LIGHT_PALETTE};

use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use tracing::error;

use crate::storage::{Storage, StorageKey, StoredRecord};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeMode {
    #[default]
    Light,
    Dark,
}

impl ThemeMode {
    pub fn toggled(self) -> Self {
        match self {
            ThemeMode::Light => ThemeMode::Dark,
            ThemeMode::Dark => ThemeMode::Light,
        }
    }

    pub fn is_dark(self) -> bool {
        self == ThemeMode::Dark
    }

    pub fn palette(self) -> &'static Palette {
        match self {
            ThemeMode::Light => &LIGHT_PALETTE,
            ThemeMode::Dark => &DARK_PALETTE,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ThemeMode::Light => "light",
            ThemeMode::Dark => "dark",
        }
    }
}

impl FromStr for ThemeMode {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "light" => Ok(ThemeMode::Light),
            "dark" => Ok(ThemeMode::Dark),
            other => bail!("Unknown theme '{}', expected 'light' or 'dark'", other),
        }
    }
}

/// Anything but "dark" reads back as light.
impl StoredRecord for ThemeMode {
    fn encode(&self) -> Result<String> {
        Ok(self.as_str().to_string())
    }

    fn decode(raw: &str) -> Result<Self> {
        Ok(if raw == "dark" {
            ThemeMode::Dark
        } else {
            ThemeMode::Light
        })
    }
}

/// Active theme plus where it is persisted.
pub struct ThemeState {
    mode: ThemeMode,
    storage: Storage,
}

impl ThemeState {
    /// Uses the stored preference, or `default` if none is stored.
    pub async fn load(storage: Storage, default: ThemeMode) -> Self {
        let mode = storage
            .get_record::<ThemeMode>(StorageKey::AppTheme.as_str())
            .await
            .unwrap_or(default);
        Self { mode, storage }
    }

    pub fn mode(&self) -> ThemeMode {
        self.mode
    }

    pub fn palette(&self) -> &'static Palette {
        self.mode.palette()
    }

    /// Flips the mode in memory and persists it. A failed write is logged;
    /// the in-memory mode still changes.
    pub async fn toggle(&mut self) -> ThemeMode {
        self.mode = self.mode.toggled();
        if let Err(err) = self
            .storage
            .set_record(StorageKey::AppTheme.as_str(), &self.mode)
            .await
        {
            error!("Error saving theme: {:#}", err);
        }
        self.mode
    }
}
