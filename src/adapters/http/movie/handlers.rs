//! HTTP handlers for catalog endpoints.

use axum::extract::{Json, Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;

use crate::adapters::http::error::ApiError;
use crate::adapters::http::middleware::{OptionalAuth, RequireAuth};
use crate::adapters::http::state::AppState;
use crate::application::handlers::movie::{
    CreateMovieCommand, DeleteMovieCommand, GetMovieQuery, ListMoviesQuery, UpdateMovieCommand,
};
use crate::domain::foundation::{Amount, MovieId};

use super::dto::MovieRequest;

/// GET /api/v1/movies - anonymous callers see premium titles as locked.
pub async fn list_movies(
    State(state): State<AppState>,
    OptionalAuth(user): OptionalAuth,
) -> Result<impl IntoResponse, ApiError> {
    let query = ListMoviesQuery {
        caller: user.map(|u| u.id),
    };
    let movies = state.list_movies_handler().handle(query).await?;
    Ok(Json(movies))
}

/// GET /api/v1/movies/:id
pub async fn get_movie(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Path(movie_id): Path<MovieId>,
) -> Result<impl IntoResponse, ApiError> {
    let query = GetMovieQuery {
        movie_id,
        caller: user.id,
    };
    let movie = state.get_movie_handler().handle(query).await?;
    Ok(Json(movie))
}

/// POST /api/v1/movies
pub async fn create_movie(
    State(state): State<AppState>,
    RequireAuth(_user): RequireAuth,
    Json(request): Json<MovieRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let cmd = CreateMovieCommand {
        name: request.name,
        cost: Amount::new(request.cost)?,
        is_premium: request.is_premium,
    };
    let movie = state.create_movie_handler().handle(cmd).await?;
    Ok((StatusCode::CREATED, Json(movie)))
}

/// PUT /api/v1/movies/:id
pub async fn update_movie(
    State(state): State<AppState>,
    RequireAuth(_user): RequireAuth,
    Path(movie_id): Path<MovieId>,
    Json(request): Json<MovieRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let cmd = UpdateMovieCommand {
        movie_id,
        name: request.name,
        cost: Amount::new(request.cost)?,
        is_premium: request.is_premium,
    };
    let movie = state.update_movie_handler().handle(cmd).await?;
    Ok(Json(movie))
}

/// DELETE /api/v1/movies/:id
pub async fn delete_movie(
    State(state): State<AppState>,
    RequireAuth(_user): RequireAuth,
    Path(movie_id): Path<MovieId>,
) -> Result<impl IntoResponse, ApiError> {
    state
        .delete_movie_handler()
        .handle(DeleteMovieCommand { movie_id })
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
