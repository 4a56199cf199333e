use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::storage::StoredRecord;

/// Account identifier as issued by the auth service. Persisted and used in
/// storage keys verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(String);

impl UserId {
    pub fn new(id: impl Into<String>) -> Self {
        UserId(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<u64> for UserId {
    fn from(id: u64) -> Self {
        UserId(id.to_string())
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl StoredRecord for UserId {
    fn encode(&self) -> Result<String> {
        Ok(self.0.clone())
    }

    fn decode(raw: &str) -> Result<Self> {
        let raw = raw.trim();
        if raw.is_empty() {
            bail!("empty user id");
        }
        Ok(UserId(raw.to_string()))
    }
}

/// Profile of the signed-in account.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionUser {
    pub id: Option<UserId>,
    pub username: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub gender: String,
    /// Avatar URL handed out by the auth service.
    pub image: String,
    /// Avatar picked on this device, shown instead of `image`.
    pub custom_avatar: Option<String>,
}

impl SessionUser {
    pub fn display_name(&self) -> String {
        let first = self.first_name.trim();
        let last = self.last_name.trim();
        if !first.is_empty() && !last.is_empty() {
            format!("{} {}", first, last)
        } else if !self.username.trim().is_empty() {
            self.username.trim().to_string()
        } else {
            "User".to_string()
        }
    }

    /// Up to two uppercase initials of the display name.
    pub fn initials(&self) -> String {
        let initials: String = self
            .display_name()
            .split_whitespace()
            .filter_map(|word| word.chars().next())
            .flat_map(char::to_uppercase)
            .take(2)
            .collect();
        if initials.is_empty() {
            "U".to_string()
        } else {
            initials
        }
    }

    pub fn avatar_uri(&self) -> Option<&str> {
        self.custom_avatar
            .as_deref()
            .filter(|uri| !uri.is_empty())
            .or_else(|| Some(self.image.as_str()).filter(|uri| !uri.is_empty()))
    }
}
