//! Movie records as returned by the catalog API.
//!
//! Field names follow the API's snake_case JSON so that the same
//! representation can be written to on-device storage and read back by
//! later versions. Unknown fields are ignored.

use serde::{Deserialize, Deserializer, Serialize};

pub type MovieId = u64;

const NOT_AVAILABLE: &str = "N/A";

fn null_to_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MovieSummary {
    pub id: MovieId,
    #[serde(default, deserialize_with = "null_to_default")]
    pub title: String,
    #[serde(default)]
    pub poster_path: Option<String>,
    #[serde(default)]
    pub backdrop_path: Option<String>,
    #[serde(default)]
    pub vote_average: Option<f64>,
    #[serde(default)]
    pub release_date: Option<String>,
    #[serde(default, deserialize_with = "null_to_default")]
    pub overview: String,
}

impl MovieSummary {
    pub fn new(id: MovieId, title: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            poster_path: None,
            backdrop_path: None,
            vote_average: None,
            release_date: None,
            overview: String::new(),
        }
    }

    pub fn rating_label(&self) -> String {
        format_rating(self.vote_average)
    }

    /// Year part of the release date, if there is a usable one.
    pub fn release_year(&self) -> Option<i32> {
        let date = self.release_date.as_deref()?.trim();
        date.get(..4)?.parse().ok()
    }

    pub fn release_year_label(&self) -> String {
        self.release_year()
            .map(|year| year.to_string())
            .unwrap_or_else(|| NOT_AVAILABLE.to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Genre {
    pub id: u64,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MovieDetails {
    #[serde(flatten)]
    pub summary: MovieSummary,
    #[serde(default)]
    pub runtime: Option<u32>,
    #[serde(default)]
    pub genres: Vec<Genre>,
    #[serde(default)]
    pub tagline: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
}

impl MovieDetails {
    pub fn runtime_label(&self) -> String {
        format_runtime(self.runtime)
    }
}

/// One page of list results.
#[derive(Debug, Deserialize)]
pub(crate) struct MoviePage {
    #[serde(default)]
    pub results: Vec<MovieSummary>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct GenreList {
    #[serde(default)]
    pub genres: Vec<Genre>,
}

/// The three lists shown on the home screen.
#[derive(Debug, Clone, Default)]
pub struct HomeFeed {
    pub trending: Vec<MovieSummary>,
    pub popular: Vec<MovieSummary>,
    pub top_rated: Vec<MovieSummary>,
}

/// A missing or zero average means nobody voted yet.
pub fn format_rating(vote_average: Option<f64>) -> String {
    match vote_average {
        Some(rating) if rating != 0.0 => format!("{:.1}", rating),
        _ => NOT_AVAILABLE.to_string(),
    }
}

pub fn format_runtime(minutes: Option<u32>) -> String {
    match minutes {
        Some(minutes) if minutes > 0 => format!("{}h {}m", minutes / 60, minutes % 60),
        _ => NOT_AVAILABLE.to_string(),
    }
}

pub fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() > max_chars {
        let mut truncated: String = text.chars().take(max_chars).collect();
        truncated.push_str("...");
        truncated
    } else {
        text.to_string()
    }
}
