use crate::session::UserId;

/// Fixed keys of the persisted layout. The string forms are part of the
/// on-device format and must not change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StorageKey {
    /// Lives in the secret medium.
    AuthToken,
    UserName,
    UserEmail,
    UserId,
    UserFirstName,
    UserLastName,
    UserGender,
    UserImage,
    ProfileAvatar,
    AppTheme,
}

impl StorageKey {
    pub const fn as_str(&self) -> &'static str {
        match self {
            StorageKey::AuthToken => "AUTH_TOKEN",
            StorageKey::UserName => "USER_NAME",
            StorageKey::UserEmail => "USER_EMAIL",
            StorageKey::UserId => "USER_ID",
            StorageKey::UserFirstName => "USER_FIRST_NAME",
            StorageKey::UserLastName => "USER_LAST_NAME",
            StorageKey::UserGender => "USER_GENDER",
            StorageKey::UserImage => "USER_IMAGE",
            StorageKey::ProfileAvatar => "PROFILE_AVATAR",
            StorageKey::AppTheme => "APP_THEME",
        }
    }
}

/// General-medium keys holding the signed-in user's profile.
pub const PROFILE_KEYS: [StorageKey; 8] = [
    StorageKey::UserName,
    StorageKey::UserEmail,
    StorageKey::UserId,
    StorageKey::UserFirstName,
    StorageKey::UserLastName,
    StorageKey::UserGender,
    StorageKey::UserImage,
    StorageKey::ProfileAvatar,
];

/// Key of a user's persisted favorites list.
pub fn favorites_key(user_id: &UserId) -> String {
    format!("FAVORITES_USER_{}", user_id)
}
