//! Mirrors the favorites collection to the general medium, one key per user.

use anyhow::{Context, Result};
use tracing::{debug, error};

use super::FavoritesStore;
use crate::catalog::MovieSummary;
use crate::session::UserId;
use crate::storage::{favorites_key, Storage, StoredRecord};

/// Stored form of a user's favorites: a JSON array of movie records.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FavoritesSnapshot(pub Vec<MovieSummary>);

impl StoredRecord for FavoritesSnapshot {
    fn encode(&self) -> Result<String> {
        serde_json::to_string(&self.0).context("Failed to serialize favorites")
    }

    fn decode(raw: &str) -> Result<Self> {
        let items = serde_json::from_str(raw).context("Failed to parse favorites")?;
        Ok(FavoritesSnapshot(items))
    }
}

/// A pending full-snapshot write, bound to the user that was active when it
/// was taken. Await it or spawn it; it is never retried.
#[must_use = "a mirror does nothing until written"]
pub struct FavoritesMirror {
    storage: Storage,
    user_id: UserId,
    key: String,
    payload: String,
}

impl FavoritesMirror {
    pub fn user_id(&self) -> &UserId {
        &self.user_id
    }

    pub async fn try_write(self) -> Result<()> {
        self.storage.set_item(&self.key, &self.payload).await
    }

    /// Best-effort write. Failures are logged and dropped.
    pub async fn write(self) {
        let key = self.key.clone();
        match self.try_write().await {
            Ok(()) => debug!("Saved favorites to {}", key),
            Err(err) => error!("Error saving favorites to {}: {:#}", key, err),
        }
    }
}

#[derive(Clone)]
pub struct FavoritesSync {
    storage: Storage,
}

impl FavoritesSync {
    pub fn new(storage: Storage) -> Self {
        Self { storage }
    }

    /// Snapshot of `store` for its current user. None if no user is set.
    pub fn mirror(&self, store: &FavoritesStore) -> Option<FavoritesMirror> {
        let user_id = store.current_user_id()?.clone();
        let snapshot = FavoritesSnapshot(store.snapshot());
        let payload = match snapshot.encode() {
            Ok(payload) => payload,
            Err(err) => {
                error!("Error encoding favorites for user {}: {:#}", user_id, err);
                return None;
            }
        };

        Some(FavoritesMirror {
            storage: self.storage.clone(),
            key: favorites_key(&user_id),
            user_id,
            payload,
        })
    }

    pub async fn save(&self, user_id: &UserId, items: &[MovieSummary]) -> Result<()> {
        self.storage
            .set_record(&favorites_key(user_id), &FavoritesSnapshot(items.to_vec()))
            .await
    }

    /// Stored favorites of `user_id`. Absent or unreadable lists are empty.
    pub async fn load(&self, user_id: &UserId) -> Vec<MovieSummary> {
        match self
            .storage
            .get_record::<FavoritesSnapshot>(&favorites_key(user_id))
            .await
        {
            Some(FavoritesSnapshot(items)) => items,
            None => {
                debug!("No stored favorites for user {}", user_id);
                Vec::new()
            }
        }
    }

    /// Replaces the store's content with the stored favorites of `user_id`.
    pub async fn load_into(&self, store: &mut FavoritesStore, user_id: UserId) {
        let items = self.load(&user_id).await;
        debug!("Loaded {} favorites for user {}", items.len(), user_id);
        store.replace_all(items, user_id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::InMemoryStore;
    use std::sync::Arc;

    fn sync_with_backend() -> (FavoritesSync, Arc<InMemoryStore>) {
        let backend = Arc::new(InMemoryStore::new());
        (FavoritesSync::new(Storage::new(backend.clone())), backend)
    }

    #[tokio::test]
    async fn no_user_no_mirror() {
        let (sync, _) = sync_with_backend();
        let mut store = FavoritesStore::new();
        store.add(MovieSummary::new(1, "A"));
        assert!(sync.mirror(&store).is_none());
    }

    #[tokio::test]
    async fn mirror_writes_user_key() {
        let (sync, _) = sync_with_backend();
        let mut store = FavoritesStore::new();
        store.replace_all(vec![], UserId::from(9));
        store.add(MovieSummary::new(42, "X"));

        let mirror = sync.mirror(&store).unwrap();
        assert_eq!(mirror.user_id(), &UserId::from(9));
        mirror.try_write().await.unwrap();

        let loaded = sync.load(&UserId::from(9)).await;
        assert_eq!(loaded, vec![MovieSummary::new(42, "X")]);
    }

    #[tokio::test]
    async fn mirror_is_a_point_in_time_snapshot() {
        let (sync, _) = sync_with_backend();
        let mut store = FavoritesStore::new();
        store.replace_all(vec![MovieSummary::new(1, "A")], UserId::from(3));

        let mirror = sync.mirror(&store).unwrap();
        store.add(MovieSummary::new(2, "B"));
        mirror.write().await;

        assert_eq!(sync.load(&UserId::from(3)).await.len(), 1);
    }

    #[tokio::test]
    async fn failed_mirror_is_dropped() {
        let (sync, backend) = sync_with_backend();
        let mut store = FavoritesStore::new();
        store.replace_all(vec![MovieSummary::new(1, "A")], UserId::from(3));

        backend.set_fail_writes(true);
        assert!(sync.mirror(&store).unwrap().try_write().await.is_err());
        sync.mirror(&store).unwrap().write().await;
        backend.set_fail_writes(false);

        assert!(sync.load(&UserId::from(3)).await.is_empty());
    }

    #[tokio::test]
    async fn users_do_not_share_favorites() {
        let (sync, _) = sync_with_backend();
        sync.save(&UserId::from(1), &[MovieSummary::new(10, "A")])
            .await
            .unwrap();
        assert!(sync.load(&UserId::from(2)).await.is_empty());
    }

    #[tokio::test]
    async fn malformed_list_loads_empty() {
        let (sync, _) = sync_with_backend();
        let storage = sync.storage.clone();
        storage
            .set_item("FAVORITES_USER_5", "{not json")
            .await
            .unwrap();

        let mut store = FavoritesStore::new();
        store.add(MovieSummary::new(1, "stale"));
        sync.load_into(&mut store, UserId::from(5)).await;

        assert!(store.is_empty());
        assert_eq!(store.current_user_id(), Some(&UserId::from(5)));
    }

    #[tokio::test]
    async fn reads_legacy_records_with_extra_fields() {
        let (sync, _) = sync_with_backend();
        sync.storage
            .set_item(
                "FAVORITES_USER_1",
                r#"[{"id": 550, "title": "Fight Club", "poster_path": "/p.jpg",
                     "genre_ids": [18], "vote_average": 8.4}]"#,
            )
            .await
            .unwrap();

        let items = sync.load(&UserId::from(1)).await;
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].poster_path.as_deref(), Some("/p.jpg"));
    }
}
