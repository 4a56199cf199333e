//! StreamBox client core
//!
//! Session, favorites, theme and persistence layers of the StreamBox movie
//! browser, plus HTTP clients for the catalog and auth services.

pub mod app;
pub mod auth;
pub mod catalog;
pub mod config;
pub mod favorites;
pub mod session;
pub mod sqlite_persistence;
pub mod storage;
pub mod theme;

// Re-export commonly used types for convenience
pub use app::{AppContext, AppServices, FavoriteChange};
pub use auth::{AuthError, AuthService, DummyJsonAuthClient};
pub use catalog::{CatalogService, MovieSummary, TmdbClient};
pub use favorites::{FavoriteToggle, FavoritesStore};
pub use session::{Session, SessionUser, UserId};
pub use storage::{SecureStorage, Storage};
pub use theme::ThemeMode;
