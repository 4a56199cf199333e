use tracing::info;

use super::{restore_profile, Session};
use crate::auth::AuthToken;
use crate::favorites::{FavoritesStore, FavoritesSync};
use crate::storage::{SecureStorage, Storage, StorageKey};

/// State reconstructed on a cold start.
#[derive(Debug)]
pub struct Bootstrapped {
    pub session: Session,
    pub favorites: FavoritesStore,
}

/// Rebuilds the session and favorites from storage. Unreadable storage is
/// treated as "no session", so this never fails.
pub async fn bootstrap(storage: &Storage, secrets: &SecureStorage) -> Bootstrapped {
    let mut favorites = FavoritesStore::new();

    let token = secrets
        .get_item(StorageKey::AuthToken.as_str())
        .await
        .filter(|token| !token.is_empty());
    let Some(token) = token else {
        info!("No stored session");
        return Bootstrapped {
            session: Session::SignedOut,
            favorites,
        };
    };

    let user = restore_profile(storage).await;
    if user.username.is_empty() {
        info!("Stored token without a profile, starting signed out");
        return Bootstrapped {
            session: Session::SignedOut,
            favorites,
        };
    }

    if let Some(user_id) = user.id.clone() {
        FavoritesSync::new(storage.clone())
            .load_into(&mut favorites, user_id)
            .await;
    }

    info!(
        "Restored session for {} with {} favorites",
        user.username,
        favorites.len()
    );
    Bootstrapped {
        session: Session::Authenticated {
            token: AuthToken::new(token),
            user,
        },
        favorites,
    }
}
