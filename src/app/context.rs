use anyhow::{bail, Result};
use std::sync::Arc;
use tracing::{error, info};

use crate::auth::{AuthError, AuthService};
use crate::catalog::{MovieId, MovieSummary};
use crate::favorites::{FavoriteToggle, FavoritesMirror, FavoritesStore, FavoritesSync};
use crate::session::{
    bootstrap, forget_profile, persist_profile, Session, SessionUser, UserId,
};
use crate::storage::{SecureStorage, Storage, StorageKey};
use crate::theme::{ThemeMode, ThemeState};

/// Collaborators the context is built from.
#[derive(Clone)]
pub struct AppServices {
    pub storage: Storage,
    pub secrets: SecureStorage,
    pub auth: Arc<dyn AuthService>,
}

/// Outcome of a favorite toggle plus the write that persists it.
pub struct FavoriteChange {
    pub outcome: FavoriteToggle,
    /// None when no user is signed in.
    pub mirror: Option<FavoritesMirror>,
}

/// Process-wide client state. All mutation goes through `&mut self`.
pub struct AppContext {
    services: AppServices,
    sync: FavoritesSync,
    session: Session,
    favorites: FavoritesStore,
    theme: ThemeState,
}

impl AppContext {
    /// Restores whatever session and preferences are stored.
    pub async fn start(services: AppServices, default_theme: ThemeMode) -> Self {
        let boot = bootstrap(&services.storage, &services.secrets).await;
        let theme = ThemeState::load(services.storage.clone(), default_theme).await;

        Self {
            sync: FavoritesSync::new(services.storage.clone()),
            session: boot.session,
            favorites: boot.favorites,
            theme,
            services,
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn favorites(&self) -> &FavoritesStore {
        &self.favorites
    }

    pub fn is_favorite(&self, movie_id: MovieId) -> bool {
        self.favorites.is_favorite(movie_id)
    }

    pub fn theme(&self) -> &ThemeState {
        &self.theme
    }

    /// Authenticates, stores the session and loads the user's favorites.
    pub async fn login(&mut self, username: &str, password: &str) -> Result<SessionUser, AuthError> {
        let username = username.trim();
        if username.is_empty() || password.is_empty() {
            return Err(AuthError::MissingCredentials);
        }

        let login = self.services.auth.login(username, password).await?;
        let mut user = login.user;

        // A device-picked avatar only carries over to the same account.
        let previous_id = self
            .services
            .storage
            .get_record::<UserId>(StorageKey::UserId.as_str())
            .await;
        if user.id.is_some() && previous_id == user.id {
            user.custom_avatar = self
                .services
                .storage
                .get_item(StorageKey::ProfileAvatar.as_str())
                .await
                .filter(|uri| !uri.is_empty());
        }

        if let Err(err) = self.store_session(login.token.expose(), &user).await {
            error!("Failed to store session for {}: {:#}", user.username, err);
            self.discard_session().await;
            return Err(AuthError::Persistence(format!("{:#}", err)));
        }

        match user.id.clone() {
            Some(user_id) => self.sync.load_into(&mut self.favorites, user_id).await,
            None => self.favorites.clear(),
        }

        info!("Signed in as {}", user.username);
        self.session = Session::Authenticated {
            token: login.token,
            user: user.clone(),
        };
        Ok(user)
    }

    pub async fn register(&self, name: &str, email: &str, password: &str) -> Result<String, AuthError> {
        self.services.auth.register(name, email, password).await
    }

    /// Drops the token and profile. Stored favorites stay for the next login.
    pub async fn logout(&mut self) {
        self.discard_session().await;
        info!("Signed out");
    }

    /// Profile first, token last: a token is only ever stored next to the
    /// profile it belongs to.
    async fn store_session(&self, token: &str, user: &SessionUser) -> Result<()> {
        persist_profile(&self.services.storage, user).await?;
        self.services
            .secrets
            .set_item(StorageKey::AuthToken.as_str(), token)
            .await
    }

    async fn discard_session(&mut self) {
        self.services
            .secrets
            .remove_item(StorageKey::AuthToken.as_str())
            .await;
        forget_profile(&self.services.storage).await;
        self.favorites.clear();
        self.session = Session::SignedOut;
    }

    pub fn toggle_favorite(&mut self, movie: MovieSummary) -> FavoriteChange {
        let outcome = self.favorites.toggle(movie);
        FavoriteChange {
            outcome,
            mirror: self.sync.mirror(&self.favorites),
        }
    }

    /// Returns the write to run, or None if nothing changed.
    pub fn add_favorite(&mut self, movie: MovieSummary) -> Option<FavoritesMirror> {
        if self.favorites.add(movie) {
            self.sync.mirror(&self.favorites)
        } else {
            None
        }
    }

    pub fn remove_favorite(&mut self, movie_id: MovieId) -> Option<FavoritesMirror> {
        if self.favorites.remove(movie_id) {
            self.sync.mirror(&self.favorites)
        } else {
            None
        }
    }

    pub async fn toggle_theme(&mut self) -> ThemeMode {
        self.theme.toggle().await
    }

    /// Stores a device-local avatar for the signed-in user.
    pub async fn set_profile_avatar(&mut self, uri: &str) -> Result<()> {
        let Some(user) = self.session.user_mut() else {
            bail!("Not signed in");
        };
        let uri = uri.trim();
        if uri.is_empty() {
            bail!("Avatar URI must not be empty");
        }

        self.services
            .storage
            .set_item(StorageKey::ProfileAvatar.as_str(), uri)
            .await?;
        user.custom_avatar = Some(uri.to_string());
        Ok(())
    }
}
