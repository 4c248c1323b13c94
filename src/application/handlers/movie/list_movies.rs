//! ListMoviesHandler - the catalog, annotated for the caller.

use std::sync::Arc;

use super::MovieView;
use crate::domain::foundation::{DomainError, UserId};
use crate::ports::{EntitlementService, MovieRepository};

/// Anonymous callers pass `caller: None` and are never premium.
#[derive(Debug, Clone, Default)]
pub struct ListMoviesQuery {
    pub caller: Option<UserId>,
}

pub struct ListMoviesHandler {
    movies: Arc<dyn MovieRepository>,
    entitlements: Arc<dyn EntitlementService>,
}

impl ListMoviesHandler {
    pub fn new(movies: Arc<dyn MovieRepository>, entitlements: Arc<dyn EntitlementService>) -> Self {
        Self { movies, entitlements }
    }

    pub async fn handle(&self, query: ListMoviesQuery) -> Result<Vec<MovieView>, DomainError> {
        let caller_is_premium = match &query.caller {
            Some(user_id) => self.entitlements.is_premium(user_id).await?,
            None => false,
        };

        let movies = self.movies.list().await?;
        Ok(movies
            .into_iter()
            .map(|movie| MovieView::for_caller(movie, caller_is_premium))
            .collect())
    }
}
