//! HTTP client for the TMDB movie-metadata API.

use anyhow::{bail, Context, Result};
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::{debug, error};

use super::models::{Genre, GenreList, MovieDetails, MovieId, MoviePage, MovieSummary};
use super::CatalogService;

pub const DEFAULT_TMDB_BASE_URL: &str = "https://api.themoviedb.org/3";
pub const DEFAULT_POSTER_BASE_URL: &str = "https://image.tmdb.org/t/p/w500";
pub const DEFAULT_BACKDROP_BASE_URL: &str = "https://image.tmdb.org/t/p/original";

#[derive(Debug, Clone)]
pub struct TmdbSettings {
    pub api_key: String,
    pub base_url: String,
    pub poster_base_url: String,
    pub backdrop_base_url: String,
    pub timeout_sec: u64,
}

impl TmdbSettings {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_TMDB_BASE_URL.to_string(),
            poster_base_url: DEFAULT_POSTER_BASE_URL.to_string(),
            backdrop_base_url: DEFAULT_BACKDROP_BASE_URL.to_string(),
            timeout_sec: 30,
        }
    }
}

pub struct TmdbClient {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
    poster_base_url: String,
    backdrop_base_url: String,
}

impl TmdbClient {
    pub fn new(settings: TmdbSettings) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(settings.timeout_sec))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            base_url: settings.base_url.trim_end_matches('/').to_string(),
            api_key: settings.api_key,
            poster_base_url: settings.poster_base_url.trim_end_matches('/').to_string(),
            backdrop_base_url: settings.backdrop_base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// GETs `path` with the api key and `params` appended as query
    /// parameters and decodes the JSON body.
    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        params: &[(&str, String)],
        what: &str,
    ) -> Result<T> {
        let url = format!("{}{}", self.base_url, path);
        debug!("GET {}", url);
        let response = self
            .client
            .get(&url)
            .query(&[("api_key", self.api_key.as_str())])
            .query(params)
            .send()
            .await
            .map_err(|err| {
                error!("Error fetching {}: {}", what, err);
                err
            })
            .with_context(|| format!("Failed to fetch {}", what))?;

        if !response.status().is_success() {
            error!("Error fetching {}: status {}", what, response.status());
            bail!("Failed to fetch {}: status {}", what, response.status());
        }

        response
            .json()
            .await
            .with_context(|| format!("Failed to parse {} response", what))
    }

    async fn get_movie_list(
        &self,
        path: &str,
        params: &[(&str, String)],
        what: &str,
    ) -> Result<Vec<MovieSummary>> {
        let page: MoviePage = self.get_json(path, params, what).await?;
        Ok(page.results)
    }
}

fn join_image_url(base: &str, path: Option<&str>) -> Option<String> {
    match path {
        Some(path) if !path.is_empty() => Some(format!("{}{}", base, path)),
        _ => None,
    }
}

#[async_trait]
impl CatalogService for TmdbClient {
    async fn trending(&self) -> Result<Vec<MovieSummary>> {
        self.get_movie_list("/trending/movie/week", &[], "trending movies")
            .await
    }

    async fn popular(&self) -> Result<Vec<MovieSummary>> {
        self.get_movie_list("/movie/popular", &[], "popular movies")
            .await
    }

    async fn top_rated(&self) -> Result<Vec<MovieSummary>> {
        self.get_movie_list("/movie/top_rated", &[], "top rated movies")
            .await
    }

    async fn upcoming(&self) -> Result<Vec<MovieSummary>> {
        self.get_movie_list("/movie/upcoming", &[], "upcoming movies")
            .await
    }

    async fn genres(&self) -> Result<Vec<Genre>> {
        let list: GenreList = self.get_json("/genre/movie/list", &[], "genres").await?;
        Ok(list.genres)
    }

    async fn movies_by_genre(&self, genre_id: u64) -> Result<Vec<MovieSummary>> {
        self.get_movie_list(
            "/discover/movie",
            &[("with_genres", genre_id.to_string())],
            "movies by genre",
        )
        .await
    }

    async fn movie_details(&self, movie_id: MovieId) -> Result<MovieDetails> {
        self.get_json(&format!("/movie/{}", movie_id), &[], "movie details")
            .await
    }

    async fn search(&self, query: &str) -> Result<Vec<MovieSummary>> {
        let query = query.trim();
        if query.is_empty() {
            return Ok(vec![]);
        }
        self.get_movie_list(
            "/search/movie",
            &[("query", query.to_string())],
            "search results",
        )
        .await
    }

    fn poster_url(&self, path: Option<&str>) -> Option<String> {
        join_image_url(&self.poster_base_url, path)
    }

    fn backdrop_url(&self, path: Option<&str>) -> Option<String> {
        join_image_url(&self.backdrop_base_url, path)
    }
}
