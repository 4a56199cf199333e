//! HTTP client for the DummyJSON auth endpoint.

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, error, info};

use super::{AuthError, AuthService, AuthToken, LoginResponse};
use crate::session::{SessionUser, UserId};

pub const DEFAULT_AUTH_BASE_URL: &str = "https://dummyjson.com/auth";

#[derive(Serialize)]
struct LoginRequest<'a> {
    username: &'a str,
    password: &'a str,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LoginPayload {
    #[serde(default)]
    id: Option<u64>,
    #[serde(default)]
    username: Option<String>,
    #[serde(default)]
    email: Option<String>,
    #[serde(default)]
    first_name: Option<String>,
    #[serde(default)]
    last_name: Option<String>,
    #[serde(default)]
    gender: Option<String>,
    #[serde(default)]
    image: Option<String>,
    #[serde(default)]
    access_token: Option<String>,
    #[serde(default)]
    token: Option<String>,
}

impl LoginPayload {
    fn into_response(self, requested_username: &str) -> Result<LoginResponse, AuthError> {
        let token = self
            .access_token
            .or(self.token)
            .filter(|token| !token.is_empty())
            .ok_or(AuthError::MissingToken)?;

        let username = self
            .username
            .filter(|name| !name.is_empty())
            .unwrap_or_else(|| requested_username.to_string());
        let email = self
            .email
            .filter(|email| !email.is_empty())
            .unwrap_or_else(|| username.clone());

        let user = SessionUser {
            id: self.id.map(UserId::from),
            username,
            email,
            first_name: self.first_name.unwrap_or_default(),
            last_name: self.last_name.unwrap_or_default(),
            gender: self.gender.unwrap_or_default(),
            image: self.image.unwrap_or_default(),
            custom_avatar: None,
        };

        Ok(LoginResponse {
            token: AuthToken::new(token),
            user,
        })
    }
}

pub struct DummyJsonAuthClient {
    client: reqwest::Client,
    base_url: String,
}

impl DummyJsonAuthClient {
    pub fn new(base_url: &str, timeout_sec: u64) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_sec))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[async_trait]
impl AuthService for DummyJsonAuthClient {
    async fn login(&self, username: &str, password: &str) -> Result<LoginResponse, AuthError> {
        if username.trim().is_empty() || password.is_empty() {
            return Err(AuthError::MissingCredentials);
        }

        let url = format!("{}/login", self.base_url);
        debug!("POST {}", url);
        let response = self
            .client
            .post(&url)
            .json(&LoginRequest { username, password })
            .send()
            .await
            .map_err(|err| {
                error!("Login request failed: {}", err);
                AuthError::Connectivity {
                    detail: err.to_string(),
                }
            })?;

        let status = response.status();
        if status == StatusCode::BAD_REQUEST {
            return Err(AuthError::InvalidCredentials);
        }
        if status == StatusCode::NOT_FOUND {
            return Err(AuthError::UserNotFound);
        }
        if !status.is_success() {
            error!("Login failed with status {}", status);
            return Err(AuthError::Connectivity {
                detail: format!("status {}", status),
            });
        }

        let payload: LoginPayload = response.json().await.map_err(|err| {
            error!("Failed to parse login response: {}", err);
            AuthError::Connectivity {
                detail: err.to_string(),
            }
        })?;

        let login = payload.into_response(username)?;
        info!("Logged in as {}", login.user.username);
        Ok(login)
    }
}
