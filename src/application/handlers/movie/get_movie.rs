//! GetMovieHandler - one catalog entry for an authenticated caller.

use std::sync::Arc;

use super::MovieView;
use crate::domain::foundation::{DomainError, ErrorCode, MovieId, UserId};
use crate::ports::{EntitlementService, MovieRepository};

#[derive(Debug, Clone)]
pub struct GetMovieQuery {
    pub movie_id: MovieId,
    pub caller: UserId,
}

pub struct GetMovieHandler {
    movies: Arc<dyn MovieRepository>,
    entitlements: Arc<dyn EntitlementService>,
}

impl GetMovieHandler {
    pub fn new(movies: Arc<dyn MovieRepository>, entitlements: Arc<dyn EntitlementService>) -> Self {
        Self { movies, entitlements }
    }

    pub async fn handle(&self, query: GetMovieQuery) -> Result<MovieView, DomainError> {
        let movie = self
            .movies
            .find_by_id(&query.movie_id)
            .await?
            .ok_or_else(|| {
                DomainError::new(
                    ErrorCode::MovieNotFound,
                    format!("Movie {} not found", query.movie_id),
                )
            })?;
        let caller_is_premium = self.entitlements.is_premium(&query.caller).await?;
        Ok(MovieView::for_caller(movie, caller_is_premium))
    }
}
