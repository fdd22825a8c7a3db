use axum::{
    extract::{Form, Path, State},
    response::{Html, IntoResponse, Redirect, Response},
};
use axum_extra::extract::cookie::SignedCookieJar;
use tracing::info;

use crate::{
    AppState, csrf,
    error::{AppError, AppResult},
    forms::{AddMovieForm, EditMovieForm},
    models::NewMovie,
    templates,
};

pub async fn home(State(state): State<AppState>) -> AppResult<Html<String>> {
    let movies = state.store.list_ranked().await?;
    Ok(Html(templates::index_page(&movies)))
}

pub async fn add_form(jar: SignedCookieJar) -> impl IntoResponse {
    let (jar, token) = csrf::issue(jar);
    (jar, Html(templates::add_page(&token, "", &[])))
}

pub async fn add_search(
    State(state): State<AppState>,
    jar: SignedCookieJar,
    Form(form): Form<AddMovieForm>,
) -> AppResult<Response> {
    let checked = csrf::verify(&jar, &form.csrf_token).and_then(|()| form.title());
    let title = match checked {
        Ok(title) => title,
        Err(message) => {
            let (jar, token) = csrf::issue(jar);
            let page = templates::add_page(&token, &form.movie, &[message]);
            return Ok((jar, Html(page)).into_response());
        },
    };

    let candidates = state.catalog.search_movies(title).await?;
    info!(title = %title, results = candidates.len(), "searched catalog");

    let page = templates::select_page(title, &candidates, &state.config.tmdb_image_base_url);
    Ok(Html(page).into_response())
}

pub async fn find(State(state): State<AppState>, Path(id): Path<i32>) -> AppResult<Redirect> {
    let details = state.catalog.get_movie(id).await?;
    let new = NewMovie::from_details(id, details, &state.config.tmdb_image_base_url)?;

    let movie = state.store.insert(new).await?;
    info!(movie_id = movie.id, title = %movie.title, "added movie");

    Ok(Redirect::to(&format!("/edit/{id}")))
}

pub async fn edit_form(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    jar: SignedCookieJar,
) -> AppResult<impl IntoResponse> {
    let movie = state.store.find(id).await?.ok_or(AppError::NotFound(id))?;

    let (jar, token) = csrf::issue(jar);
    let rating = templates::format_rating(movie.rating);
    let review = movie.review.clone().unwrap_or_default();
    Ok((jar, Html(templates::edit_page(&movie, &token, &rating, &review, &[]))))
}

pub async fn edit_save(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    jar: SignedCookieJar,
    Form(form): Form<EditMovieForm>,
) -> AppResult<Response> {
    let movie = state.store.find(id).await?.ok_or(AppError::NotFound(id))?;

    if let Err(message) = csrf::verify(&jar, &form.csrf_token) {
        let (jar, token) = csrf::issue(jar);
        let page = templates::edit_page(&movie, &token, &form.rating, &form.review, &[message]);
        return Ok((jar, Html(page)).into_response());
    }

    // An unparsable rating is ignored rather than reported; the review is
    // saved either way.
    let rating = form.rating();
    let movie = state.store.save_review(movie, rating, form.review).await?;
    info!(movie_id = movie.id, rating = ?movie.rating, "saved review");

    Ok(Redirect::to("/").into_response())
}

pub async fn delete(State(state): State<AppState>, Path(id): Path<i32>) -> AppResult<Redirect> {
    if !state.store.delete(id).await? {
        return Err(AppError::NotFound(id));
    }
    info!(movie_id = id, "deleted movie");
    Ok(Redirect::to("/"))
}
