//! Axum router for catalog endpoints.

use axum::routing::get;
use axum::Router;

use super::handlers::{create_movie, delete_movie, get_movie, list_movies, update_movie};
use crate::adapters::http::state::AppState;

/// Catalog routes, mounted at `/api/v1/movies`.
pub fn movie_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_movies).post(create_movie))
        .route("/:id", get(get_movie).put(update_movie).delete(delete_movie))
}
