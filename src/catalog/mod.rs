mod client;
mod models;

pub use client::{
    TmdbClient, TmdbSettings, DEFAULT_BACKDROP_BASE_URL, DEFAULT_POSTER_BASE_URL,
    DEFAULT_TMDB_BASE_URL,
};
pub use models::{
    format_rating, format_runtime, truncate, Genre, HomeFeed, MovieDetails, MovieId,
    MovieSummary,
};

use anyhow::Result;
use async_trait::async_trait;

/// Read-only access to movie lists, details and search.
#[async_trait]
pub trait CatalogService: Send + Sync {
    /// Movies trending this week.
    async fn trending(&self) -> Result<Vec<MovieSummary>>;

    async fn popular(&self) -> Result<Vec<MovieSummary>>;

    async fn top_rated(&self) -> Result<Vec<MovieSummary>>;

    async fn upcoming(&self) -> Result<Vec<MovieSummary>>;

    async fn genres(&self) -> Result<Vec<Genre>>;

    async fn movies_by_genre(&self, genre_id: u64) -> Result<Vec<MovieSummary>>;

    async fn movie_details(&self, movie_id: MovieId) -> Result<MovieDetails>;

    /// Returns an empty list for a blank query without hitting the network.
    async fn search(&self, query: &str) -> Result<Vec<MovieSummary>>;

    /// Absolute poster URL for an API image path.
    fn poster_url(&self, path: Option<&str>) -> Option<String>;

    /// Absolute full-size backdrop URL for an API image path.
    fn backdrop_url(&self, path: Option<&str>) -> Option<String>;

    /// Image for a details header: the backdrop, falling back to the poster.
    fn hero_image_url(&self, movie: &MovieSummary) -> Option<String> {
        self.backdrop_url(movie.backdrop_path.as_deref())
            .or_else(|| self.poster_url(movie.poster_path.as_deref()))
    }
}

/// Fetches the home screen lists concurrently. Any failing list fails the
/// whole feed.
pub async fn home_feed(catalog: &dyn CatalogService) -> Result<HomeFeed> {
    let (trending, popular, top_rated) = futures::future::try_join3(
        catalog.trending(),
        catalog.popular(),
        catalog.top_rated(),
    )
    .await?;

    Ok(HomeFeed {
        trending,
        popular,
        top_rated,
    })
}
