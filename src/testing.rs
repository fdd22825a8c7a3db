//! In-process fixture for handler tests: the real router and an in-memory
//! SQLite store, with the movie service replaced by [`MockCatalog`].

use std::{collections::HashMap, sync::Arc};

use async_trait::async_trait;
use axum::{
    Router,
    body::Body,
    http::{HeaderMap, HeaderName, Request, StatusCode, header},
};
use http_body_util::BodyExt;
use tokio::sync::RwLock;
use tower::ServiceExt;

use crate::{
    AppState,
    catalog::{Candidate, CatalogError, MovieCatalog, MovieDetails},
    config::{Config, TmdbCredential},
    db,
    models::NewMovie,
    store::MovieStore,
};

#[derive(Clone, Debug, PartialEq)]
pub enum RecordedQuery {
    Search { title: String },
    Get { id: i32 },
}

#[derive(Default)]
pub struct MockCatalog {
    search_results: RwLock<Vec<Candidate>>,
    movies: RwLock<HashMap<i32, MovieDetails>>,
    queries: RwLock<Vec<RecordedQuery>>,
    next_error: RwLock<Option<CatalogError>>,
}

impl MockCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn set_search_results(&self, results: Vec<Candidate>) {
        *self.search_results.write().await = results;
    }

    pub async fn add_movie(&self, id: i32, details: MovieDetails) {
        self.movies.write().await.insert(id, details);
    }

    /// The next call fails with `err`, whichever operation it is.
    pub async fn fail_next(&self, err: CatalogError) {
        *self.next_error.write().await = Some(err);
    }

    pub async fn queries(&self) -> Vec<RecordedQuery> {
        self.queries.read().await.clone()
    }

    async fn record(&self, query: RecordedQuery) -> Result<(), CatalogError> {
        self.queries.write().await.push(query);
        match self.next_error.write().await.take() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl MovieCatalog for MockCatalog {
    async fn search_movies(&self, title: &str) -> Result<Vec<Candidate>, CatalogError> {
        self.record(RecordedQuery::Search { title: title.to_string() }).await?;
        Ok(self.search_results.read().await.clone())
    }

    async fn get_movie(&self, id: i32) -> Result<MovieDetails, CatalogError> {
        self.record(RecordedQuery::Get { id }).await?;
        self.movies.read().await.get(&id).cloned().ok_or(CatalogError::NotFound(id))
    }
}

pub fn candidate(id: i32, title: &str, release_date: &str) -> Candidate {
    Candidate {
        id,
        title: title.to_string(),
        release_date: release_date.to_string(),
        poster_path: Some(format!("/{id}.jpg")),
        overview: String::new(),
    }
}

pub fn details(id: i32, title: &str, release_date: &str) -> MovieDetails {
    MovieDetails {
        title: title.to_string(),
        overview: format!("About {title}"),
        release_date: release_date.to_string(),
        poster_path: Some(format!("/{id}.jpg")),
    }
}

pub fn test_config() -> Config {
    Config {
        addr: ([127, 0, 0, 1], 0).into(),
        database_url: "sqlite::memory:".to_string(),
        secret_key: "test-secret-key-test-secret-key-test-secret-key-test-secret-key".to_string(),
        tmdb_credential: TmdbCredential::ApiKey("test".to_string()),
        tmdb_base_url: "http://127.0.0.1:9".to_string(),
        tmdb_image_base_url: "https://image.tmdb.org/t/p/w500".to_string(),
        tmdb_rps: 4,
        tmdb_timeout_secs: 1,
    }
}

#[derive(Debug)]
pub struct TestResponse {
    pub status: StatusCode,
    pub body: String,
    pub location: Option<String>,
    pub set_cookie: Option<String>,
    pub content_type: Option<String>,
}

impl TestResponse {
    /// The hidden CSRF field rendered into a form page.
    pub fn csrf_token(&self) -> Option<String> {
        let marker = "name=\"csrf_token\" value=\"";
        let start = self.body.find(marker)? + marker.len();
        let len = self.body[start..].find('"')?;
        Some(self.body[start..start + len].to_string())
    }
}

pub struct TestApp {
    pub router: Router,
    pub store: MovieStore,
    pub catalog: Arc<MockCatalog>,
}

impl TestApp {
    pub async fn new() -> Self {
        let config = Arc::new(test_config());
        let db = db::connect_and_migrate(&config.database_url)
            .await
            .expect("in-memory database");
        let store = MovieStore::new(db);
        let catalog = Arc::new(MockCatalog::new());

        let state = AppState::new(config, store.clone(), catalog.clone());
        Self { router: crate::app(state), store, catalog }
    }

    /// Inserts a movie directly, bypassing the catalog.
    pub async fn seed(&self, id: i32, title: &str, rating: Option<f64>, review: Option<&str>) {
        let new = NewMovie {
            id,
            title: title.to_string(),
            image_url: format!("https://image.tmdb.org/t/p/w500/{id}.jpg"),
            year: 2000,
            description: format!("About {title}"),
        };
        let movie = self.store.insert(new).await.expect("seed insert");
        if rating.is_some() || review.is_some() {
            let review = review.unwrap_or_default().to_string();
            self.store.save_review(movie, rating, review).await.expect("seed review");
        }
    }

    pub async fn get(&self, path: &str) -> TestResponse {
        let req = Request::get(path).body(Body::empty()).expect("request");
        self.send(req).await
    }

    /// Posts url-encoded `fields`, presenting `set_cookie` (a raw `Set-Cookie`
    /// value from an earlier response) as the request cookie.
    pub async fn post(
        &self,
        path: &str,
        fields: &[(&str, &str)],
        set_cookie: Option<&str>,
    ) -> TestResponse {
        let body = fields
            .iter()
            .map(|(k, v)| format!("{}={}", urlencoding::encode(k), urlencoding::encode(v)))
            .collect::<Vec<_>>()
            .join("&");

        let mut req = Request::post(path)
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded");
        if let Some(set_cookie) = set_cookie {
            let pair = set_cookie.split(';').next().unwrap_or_default();
            req = req.header(header::COOKIE, pair);
        }
        self.send(req.body(Body::from(body)).expect("request")).await
    }

    /// Loads the form at `form_path` and posts `fields` to `action` along with
    /// the CSRF token and cookie it handed out.
    pub async fn submit(
        &self,
        form_path: &str,
        action: &str,
        fields: &[(&str, &str)],
    ) -> TestResponse {
        let form = self.get(form_path).await;
        let token = form.csrf_token().expect("form carries a csrf token");

        let mut fields = fields.to_vec();
        fields.push(("csrf_token", token.as_str()));
        self.post(action, &fields, form.set_cookie.as_deref()).await
    }

    async fn send(&self, req: Request<Body>) -> TestResponse {
        let resp = self.router.clone().oneshot(req).await.expect("router is infallible");

        let status = resp.status();
        let location = header_str(resp.headers(), header::LOCATION);
        let set_cookie = header_str(resp.headers(), header::SET_COOKIE);
        let content_type = header_str(resp.headers(), header::CONTENT_TYPE);

        let bytes = resp.into_body().collect().await.expect("body").to_bytes();
        let body = String::from_utf8(bytes.to_vec()).expect("utf-8 body");

        TestResponse { status, body, location, set_cookie, content_type }
    }
}

fn header_str(headers: &HeaderMap, name: HeaderName) -> Option<String> {
    headers.get(name).and_then(|v| v.to_str().ok()).map(str::to_string)
}
