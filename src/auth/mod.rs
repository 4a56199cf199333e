//! Authentication against the remote demo identity service.

mod client;

pub use client::{DummyJsonAuthClient, DEFAULT_AUTH_BASE_URL};

use crate::session::SessionUser;
use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};
use std::fmt;
use thiserror::Error;

pub const REGISTRATION_MESSAGE: &str = "Registration successful! Please login.";

/// Bearer token handed out on login. Never printed.
pub struct AuthToken(SecretString);

impl AuthToken {
    pub fn new(value: impl Into<String>) -> Self {
        AuthToken(SecretString::from(value.into()))
    }

    pub fn expose(&self) -> &str {
        self.0.expose_secret()
    }
}

impl fmt::Debug for AuthToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AuthToken([REDACTED])")
    }
}

#[derive(Debug)]
pub struct LoginResponse {
    pub token: AuthToken,
    pub user: SessionUser,
}

/// Failures surfaced to the user. The display strings are the messages
/// shown on screen.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Username and password are required.")]
    MissingCredentials,

    #[error("Invalid username or password.")]
    InvalidCredentials,

    #[error("User not found.")]
    UserNotFound,

    #[error("Login failed. Please check your internet connection.")]
    Connectivity { detail: String },

    #[error("No token received from server")]
    MissingToken,

    #[error("Could not save the session: {0}")]
    Persistence(String),

    #[error("Name, email and password are required.")]
    MissingRegistrationFields,
}

#[async_trait]
pub trait AuthService: Send + Sync {
    async fn login(&self, username: &str, password: &str) -> Result<LoginResponse, AuthError>;

    /// Registration is simulated locally; the demo service has no sign-up
    /// endpoint. Returns the confirmation message.
    async fn register(
        &self,
        name: &str,
        email: &str,
        password: &str,
    ) -> Result<String, AuthError> {
        if name.trim().is_empty() || email.trim().is_empty() || password.is_empty() {
            return Err(AuthError::MissingRegistrationFields);
        }
        Ok(REGISTRATION_MESSAGE.to_string())
    }
}
