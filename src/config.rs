use std::net::SocketAddr;

use anyhow::{Context, bail};

/// Cookie signing keys are derived from `SECRET_KEY`; shorter secrets are rejected.
pub const MIN_SECRET_LEN: usize = 32;

#[derive(Clone, Debug, PartialEq)]
pub enum TmdbCredential {
    /// v4 read access token, sent as a bearer header.
    AccessToken(String),
    /// v3 key, sent as the `api_key` query parameter.
    ApiKey(String),
}

#[derive(Clone, Debug)]
pub struct Config {
    pub addr: SocketAddr,
    pub database_url: String,
    pub secret_key: String,
    pub tmdb_credential: TmdbCredential,
    pub tmdb_base_url: String,
    pub tmdb_image_base_url: String,
    pub tmdb_rps: u32,
    pub tmdb_timeout_secs: u64,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_vars(|name| std::env::var(name).ok())
    }

    pub fn from_vars(var: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let present = |name: &str| var(name).filter(|v| !v.trim().is_empty());

        let host = var("HOST").unwrap_or_else(|| "0.0.0.0".to_string());
        let port: u16 = var("PORT").unwrap_or_else(|| "3000".to_string()).parse().context("PORT")?;

        let tmdb_credential = match (present("TMDB_ACCESS_TOKEN"), present("TMDB_API_KEY")) {
            (Some(token), _) => TmdbCredential::AccessToken(token),
            (None, Some(key)) => TmdbCredential::ApiKey(key),
            (None, None) => bail!("TMDB_ACCESS_TOKEN or TMDB_API_KEY must be set"),
        };

        let secret_key = present("SECRET_KEY").context("SECRET_KEY must be set")?;
        if secret_key.len() < MIN_SECRET_LEN {
            bail!("SECRET_KEY must be at least {MIN_SECRET_LEN} bytes");
        }

        let database_url = present("DATABASE_URL").context("DATABASE_URL must be set")?;

        let tmdb_base_url =
            var("TMDB_BASE_URL").unwrap_or_else(|| "https://api.themoviedb.org/3".to_string());
        let tmdb_image_base_url = var("TMDB_IMAGE_BASE_URL")
            .unwrap_or_else(|| "https://image.tmdb.org/t/p/w500".to_string());

        let tmdb_rps: u32 = var("TMDB_RPS").and_then(|s| s.parse().ok()).unwrap_or(4);
        let tmdb_timeout_secs: u64 =
            var("TMDB_TIMEOUT_SECS").and_then(|s| s.parse().ok()).unwrap_or(10);

        Ok(Self {
            addr: format!("{host}:{port}").parse().context("HOST/PORT")?,
            database_url,
            secret_key,
            tmdb_credential,
            tmdb_base_url,
            tmdb_image_base_url,
            tmdb_rps,
            tmdb_timeout_secs,
        })
    }
}
