use std::collections::HashSet;

use crate::catalog::{MovieId, MovieSummary};
use crate::session::UserId;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FavoriteToggle {
    Added,
    Removed,
}

/// In-memory favorites of the active user, in insertion order and unique
/// by movie id.
#[derive(Debug, Default)]
pub struct FavoritesStore {
    items: Vec<MovieSummary>,
    current_user_id: Option<UserId>,
}

impl FavoritesStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns false if a movie with the same id is already present.
    pub fn add(&mut self, movie: MovieSummary) -> bool {
        if self.is_favorite(movie.id) {
            return false;
        }
        self.items.push(movie);
        true
    }

    /// Returns false if no movie with `movie_id` was present.
    pub fn remove(&mut self, movie_id: MovieId) -> bool {
        let before = self.items.len();
        self.items.retain(|movie| movie.id != movie_id);
        self.items.len() != before
    }

    pub fn toggle(&mut self, movie: MovieSummary) -> FavoriteToggle {
        if self.remove(movie.id) {
            FavoriteToggle::Removed
        } else {
            self.items.push(movie);
            FavoriteToggle::Added
        }
    }

    /// Swaps in a whole collection for `user_id`. Later duplicates of an id
    /// are dropped.
    pub fn replace_all(&mut self, items: Vec<MovieSummary>, user_id: UserId) {
        let mut seen = HashSet::with_capacity(items.len());
        self.items = items
            .into_iter()
            .filter(|movie| seen.insert(movie.id))
            .collect();
        self.current_user_id = Some(user_id);
    }

    pub fn set_current_user_id(&mut self, user_id: Option<UserId>) {
        self.current_user_id = user_id;
    }

    pub fn clear(&mut self) {
        self.items.clear();
        self.current_user_id = None;
    }

    pub fn is_favorite(&self, movie_id: MovieId) -> bool {
        self.items.iter().any(|movie| movie.id == movie_id)
    }

    pub fn items(&self) -> &[MovieSummary] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn current_user_id(&self) -> Option<&UserId> {
        self.current_user_id.as_ref()
    }

    pub fn snapshot(&self) -> Vec<MovieSummary> {
        self.items.clone()
    }
}
