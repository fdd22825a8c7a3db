use axum::http::StatusCode;
use maud::{DOCTYPE, Markup, html};

use crate::{catalog::Candidate, entities::movie};

const TAILWIND_CDN: &str = "https://cdn.tailwindcss.com";

const INPUT_CLASS: &str = "mt-2 w-full rounded-md border border-gray-300 px-3 py-2 focus:border-blue-500 focus:outline-none focus:ring-1 focus:ring-blue-500";
const BUTTON_CLASS: &str =
    "w-full rounded-md bg-blue-600 px-4 py-2 font-semibold text-white hover:bg-blue-700";

pub fn index_page(movies: &[movie::Model]) -> String {
    page(
        "My Top Movies",
        html! {
            div class="max-w-4xl mx-auto px-6 py-12" {
                div class="flex items-start justify-between gap-6" {
                    div {
                        h1 class="text-3xl font-bold text-gray-900" { "My Top Movies" }
                        p class="mt-2 text-gray-600" { "These are my all-time favourite movies." }
                    }
                    a class="rounded-md bg-blue-600 px-4 py-2 font-semibold text-white hover:bg-blue-700" href="/add" { "Add movie" }
                }

                @if movies.is_empty() {
                    div class="mt-10 bg-white shadow rounded-lg p-8" {
                        p class="text-gray-600" { "Nothing here yet. Add a movie to start ranking." }
                    }
                } @else {
                    div class="mt-10 space-y-4" {
                        @for movie in movies {
                            (movie_card(movie))
                        }
                    }
                }
            }
        },
    )
}

pub fn add_page(csrf_token: &str, title: &str, errors: &[&str]) -> String {
    page(
        "Add Movie",
        html! {
            div class="max-w-2xl mx-auto px-6 py-12" {
                div class="bg-white shadow rounded-lg p-8" {
                    h1 class="text-3xl font-bold text-gray-900" { "Add a Movie" }

                    form class="mt-8 space-y-6" method="post" action="/add" novalidate {
                        input type="hidden" name="csrf_token" value=(csrf_token);
                        div {
                            label class="block text-sm font-medium text-gray-700" for="movie" { "Enter The Movie Title" }
                            input class=(INPUT_CLASS) name="movie" id="movie" value=(title) required;
                            (field_errors(errors))
                        }
                        button class=(BUTTON_CLASS) type="submit" { "Search" }
                    }
                }
            }
        },
    )
}

pub fn select_page(query: &str, candidates: &[Candidate], image_base_url: &str) -> String {
    page(
        "Select Movie",
        html! {
            div class="max-w-2xl mx-auto px-6 py-12" {
                div class="bg-white shadow rounded-lg p-8" {
                    h1 class="text-3xl font-bold text-gray-900" { "Select Movie" }
                    p class="mt-2 text-gray-600" { "Results for \u{201c}" (query) "\u{201d}" }

                    @if candidates.is_empty() {
                        p class="mt-6 text-gray-600" { "No movies matched that title." }
                    } @else {
                        ul class="mt-6 divide-y divide-gray-200" {
                            @for candidate in candidates {
                                li class="py-3 flex gap-4" {
                                    @if let Some(poster) = &candidate.poster_path {
                                        img class="w-12 rounded" src=(format!("{}{}", image_base_url.trim_end_matches('/'), poster)) alt="";
                                    }
                                    div {
                                        a class="text-blue-600 hover:text-blue-800" href=(format!("/find/{}", candidate.id)) {
                                            (candidate.title)
                                            @if !candidate.release_date.is_empty() {
                                                span class="ml-2 text-gray-500" { "- " (candidate.release_date) }
                                            }
                                        }
                                        @if !candidate.overview.is_empty() {
                                            p class="mt-1 text-sm text-gray-500 line-clamp-2" { (candidate.overview) }
                                        }
                                    }
                                }
                            }
                        }
                    }

                    a class="mt-6 inline-block text-sm text-blue-600 hover:text-blue-800" href="/add" { "Search again" }
                }
            }
        },
    )
}

pub fn edit_page(
    movie: &movie::Model,
    csrf_token: &str,
    rating: &str,
    review: &str,
    errors: &[&str],
) -> String {
    page(
        "Edit Movie",
        html! {
            div class="max-w-2xl mx-auto px-6 py-12" {
                div class="bg-white shadow rounded-lg p-8" {
                    h1 class="text-3xl font-bold text-gray-900" { (movie.title) }
                    p class="mt-2 text-gray-600" { "Edit Movie Rating" }

                    form class="mt-8 space-y-6" method="post" action=(format!("/edit/{}", movie.id)) {
                        input type="hidden" name="csrf_token" value=(csrf_token);
                        (field_errors(errors))
                        div {
                            label class="block text-sm font-medium text-gray-700" for="rating" { "Your Rating out of 10" }
                            input class=(INPUT_CLASS) name="rating" id="rating" value=(rating);
                        }
                        div {
                            label class="block text-sm font-medium text-gray-700" for="review" { "Your Review" }
                            input class=(INPUT_CLASS) name="review" id="review" value=(review);
                        }
                        button class=(BUTTON_CLASS) type="submit" { "Done" }
                    }
                }
            }
        },
    )
}

pub fn error_page(status: StatusCode, message: &str) -> String {
    let heading = status.canonical_reason().unwrap_or("Error");
    page(
        heading,
        html! {
            div class="min-h-screen flex items-center justify-center" {
                div class="max-w-xl w-full px-6" {
                    div class="bg-white shadow rounded-lg p-8" {
                        h1 class="text-2xl font-bold text-gray-900" { (heading) }
                        p class="mt-4 text-gray-700" { (message) }
                        a class="mt-6 inline-block text-blue-600 hover:text-blue-800" href="/" { "Back to my list" }
                    }
                }
            }
        },
    )
}

/// Ratings are shown the way they were typed: `8` rather than `8.0`.
pub fn format_rating(rating: Option<f64>) -> String {
    rating.map(|r| r.to_string()).unwrap_or_default()
}

fn page(title: &str, body: Markup) -> String {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1";
                title { (title) }
                script src=(TAILWIND_CDN) {}
            }
            body class="min-h-screen bg-gray-50" { (body) }
        }
    }
    .into_string()
}

fn field_errors(errors: &[&str]) -> Markup {
    html! {
        @for error in errors {
            p class="mt-2 text-sm text-red-600" { (error) }
        }
    }
}

fn movie_card(movie: &movie::Model) -> Markup {
    html! {
        div class="bg-white shadow rounded-lg p-6 flex gap-6" {
            img class="w-28 rounded" src=(movie.image_url) alt=(movie.title);
            div class="flex-1" {
                div class="flex items-start justify-between gap-4" {
                    h2 class="text-xl font-semibold text-gray-900" {
                        @if let Some(rank) = movie.ranking {
                            span class="mr-2 text-gray-400" { "#" (rank) }
                        }
                        (movie.title)
                        span class="ml-2 font-normal text-gray-500" { "(" (movie.year) ")" }
                    }
                    @if movie.rating.is_some() {
                        span class="text-lg font-semibold text-amber-600" { (format_rating(movie.rating)) "/10" }
                    }
                }
                @if let Some(review) = movie.review.as_deref().filter(|r| !r.is_empty()) {
                    p class="mt-2 italic text-gray-700" { "\u{201c}" (review) "\u{201d}" }
                }
                p class="mt-2 text-sm text-gray-600" { (movie.description) }
                div class="mt-4 flex gap-4 text-sm" {
                    a class="text-blue-600 hover:text-blue-800" href=(format!("/edit/{}", movie.id)) { "Update" }
                    a class="text-red-600 hover:text-red-800" href=(format!("/delete/{}", movie.id)) { "Delete" }
                }
            }
        }
    }
}
