mod store;
mod sync;

pub use store::{FavoriteToggle, FavoritesStore};
pub use sync::{FavoritesMirror, FavoritesSnapshot, FavoritesSync};
