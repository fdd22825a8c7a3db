//! The remote movie-metadata service as seen by the rest of the app.
//!
//! Handlers only ever talk to [`MovieCatalog`], so tests swap the TMDB client
//! for an in-memory double.

use async_trait::async_trait;
use serde::{Deserialize, Deserializer};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("movie service request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("movie {0} was not found in the movie service")]
    NotFound(i32),

    #[error("movie service returned {status}: {message}")]
    Api { status: u16, message: String },

    #[error("movie service sent an unusable response: {0}")]
    Malformed(String),
}

/// A search result the user can pick from. Not persisted.
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct Candidate {
    pub id: i32,
    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub release_date: String,
    #[serde(default)]
    pub poster_path: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub overview: String,
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct MovieDetails {
    pub title: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub overview: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub release_date: String,
    #[serde(default)]
    pub poster_path: Option<String>,
}

// TMDB sends `null` for text it does not have.
fn null_as_default<'de, D, T>(de: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(de)?.unwrap_or_default())
}

#[async_trait]
pub trait MovieCatalog: Send + Sync {
    async fn search_movies(&self, title: &str) -> Result<Vec<Candidate>, CatalogError>;

    async fn get_movie(&self, id: i32) -> Result<MovieDetails, CatalogError>;
}
