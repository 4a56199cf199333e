//! Profile fields in the general medium.

use anyhow::Result;

use super::{SessionUser, UserId};
use crate::storage::{Storage, StorageKey, PROFILE_KEYS};

/// Writes every profile field. Fails on the first field that cannot be
/// written. A missing id removes any stale `USER_ID`.
pub async fn persist_profile(storage: &Storage, user: &SessionUser) -> Result<()> {
    match &user.id {
        Some(id) => storage.set_record(StorageKey::UserId.as_str(), id).await?,
        None => storage.remove_item(StorageKey::UserId.as_str()).await,
    }

    let fields = [
        (StorageKey::UserName, &user.username),
        (StorageKey::UserEmail, &user.email),
        (StorageKey::UserFirstName, &user.first_name),
        (StorageKey::UserLastName, &user.last_name),
        (StorageKey::UserGender, &user.gender),
        (StorageKey::UserImage, &user.image),
    ];
    for (key, value) in fields {
        storage.set_item(key.as_str(), value).await?;
    }

    match &user.custom_avatar {
        Some(uri) => storage.set_item(StorageKey::ProfileAvatar.as_str(), uri).await,
        None => {
            storage.remove_item(StorageKey::ProfileAvatar.as_str()).await;
            Ok(())
        }
    }
}

/// Rebuilds the profile from whatever fields are readable. Missing fields
/// come back empty.
pub async fn restore_profile(storage: &Storage) -> SessionUser {
    SessionUser {
        id: storage
            .get_record::<UserId>(StorageKey::UserId.as_str())
            .await,
        username: read_field(storage, StorageKey::UserName).await,
        email: read_field(storage, StorageKey::UserEmail).await,
        first_name: read_field(storage, StorageKey::UserFirstName).await,
        last_name: read_field(storage, StorageKey::UserLastName).await,
        gender: read_field(storage, StorageKey::UserGender).await,
        image: read_field(storage, StorageKey::UserImage).await,
        custom_avatar: storage
            .get_item(StorageKey::ProfileAvatar.as_str())
            .await
            .filter(|uri| !uri.is_empty()),
    }
}

async fn read_field(storage: &Storage, key: StorageKey) -> String {
    storage.get_item(key.as_str()).await.unwrap_or_default()
}

pub async fn forget_profile(storage: &Storage) {
    for key in PROFILE_KEYS {
        storage.remove_item(key.as_str()).await;
    }
}
