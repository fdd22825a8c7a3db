use std::{num::NonZeroU32, sync::Arc};

use async_trait::async_trait;
use governor::{
    Quota, RateLimiter,
    clock::DefaultClock,
    state::{InMemoryState, NotKeyed},
};
use reqwest::{RequestBuilder, Response, StatusCode};
use serde::Deserialize;
use tracing::debug;

use crate::{
    catalog::{Candidate, CatalogError, MovieCatalog, MovieDetails},
    config::TmdbCredential,
};

pub struct TmdbClient {
    client: reqwest::Client,
    credential: TmdbCredential,
    base_url: String,
    limiter: Arc<RateLimiter<NotKeyed, InMemoryState, DefaultClock>>,
}

impl TmdbClient {
    pub fn new(
        client: reqwest::Client,
        credential: TmdbCredential,
        base_url: String,
        rps: u32,
    ) -> Self {
        let quota = Quota::per_second(NonZeroU32::new(rps).unwrap_or(NonZeroU32::MIN));
        let limiter = Arc::new(RateLimiter::direct(quota));
        Self { client, credential, base_url, limiter }
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), path)
    }

    fn authorize(&self, req: RequestBuilder) -> RequestBuilder {
        match &self.credential {
            TmdbCredential::AccessToken(token) => req.bearer_auth(token),
            TmdbCredential::ApiKey(key) => req.query(&[("api_key", key)]),
        }
    }

    async fn send(&self, req: RequestBuilder) -> Result<Response, CatalogError> {
        self.limiter.until_ready().await;
        Ok(self.authorize(req).send().await?)
    }
}

#[async_trait]
impl MovieCatalog for TmdbClient {
    async fn search_movies(&self, title: &str) -> Result<Vec<Candidate>, CatalogError> {
        debug!(title = %title, "searching TMDB");

        let req = self.client.get(self.url("search/movie")).query(&[("query", title)]);
        let resp = check_status(self.send(req).await?).await?;

        let body: SearchResponse = resp
            .json()
            .await
            .map_err(|e| CatalogError::Malformed(format!("search results: {e}")))?;

        debug!(title = %title, results = body.results.len(), "TMDB search finished");
        Ok(body.results)
    }

    async fn get_movie(&self, id: i32) -> Result<MovieDetails, CatalogError> {
        debug!(movie_id = id, "fetching TMDB details");

        let req = self.client.get(self.url(&format!("movie/{id}")));
        let resp = self.send(req).await?;
        if resp.status() == StatusCode::NOT_FOUND {
            return Err(CatalogError::NotFound(id));
        }

        check_status(resp)
            .await?
            .json()
            .await
            .map_err(|e| CatalogError::Malformed(format!("movie {id}: {e}")))
    }
}

async fn check_status(resp: Response) -> Result<Response, CatalogError> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }
    let message = resp.text().await.unwrap_or_default();
    Err(CatalogError::Api { status: status.as_u16(), message })
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    results: Vec<Candidate>,
}
