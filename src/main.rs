mod catalog;
mod config;
mod csrf;
mod db;
mod entities;
mod error;
mod forms;
mod models;
mod ranking;
mod routes;
mod store;
mod templates;
#[cfg(test)]
mod testing;
mod tmdb;

use std::{sync::Arc, time::Duration};

use axum::{Router, extract::FromRef, routing::get};
use axum_extra::extract::cookie::Key;
use tower_http::trace::TraceLayer;

use crate::{catalog::MovieCatalog, config::Config, store::MovieStore, tmdb::TmdbClient};

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub store: MovieStore,
    pub catalog: Arc<dyn MovieCatalog>,
    cookie_key: Key,
}

impl AppState {
    pub fn new(config: Arc<Config>, store: MovieStore, catalog: Arc<dyn MovieCatalog>) -> Self {
        // `Config` guarantees the secret is long enough to derive from.
        let cookie_key = Key::derive_from(config.secret_key.as_bytes());
        Self { config, store, catalog, cookie_key }
    }
}

impl FromRef<AppState> for Key {
    fn from_ref(state: &AppState) -> Self {
        state.cookie_key.clone()
    }
}

pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/", get(routes::home))
        .route("/add", get(routes::add_form).post(routes::add_search))
        .route("/find/{id}", get(routes::find).post(routes::find))
        .route("/edit/{id}", get(routes::edit_form).post(routes::edit_save))
        .route("/delete/{id}", get(routes::delete).post(routes::delete))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            std::env::var("RUST_LOG")
                .unwrap_or_else(|_| "info,reelrank=debug,sqlx=warn".to_string()),
        )
        .init();

    let config = Arc::new(Config::from_env()?);

    let http = reqwest::Client::builder()
        .user_agent("reelrank/0.1")
        .timeout(Duration::from_secs(config.tmdb_timeout_secs))
        .build()?;

    let db = db::connect_and_migrate(&config.database_url).await?;
    let store = MovieStore::new(db);

    let tmdb = TmdbClient::new(
        http,
        config.tmdb_credential.clone(),
        config.tmdb_base_url.clone(),
        config.tmdb_rps,
    );

    let state = AppState::new(config.clone(), store, Arc::new(tmdb));

    let listener = tokio::net::TcpListener::bind(config.addr).await?;
    tracing::info!(addr = %config.addr, "listening");
    axum::serve(listener, app(state)).await?;

    Ok(())
}
