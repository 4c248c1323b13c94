//! CreateMovieHandler - adds a catalog entry.

use std::sync::Arc;

use super::MovieView;
use crate::domain::foundation::{Amount, DomainError};
use crate::domain::movie::Movie;
use crate::ports::MovieRepository;

#[derive(Debug, Clone)]
pub struct CreateMovieCommand {
    pub name: String,
    pub cost: Amount,
    pub is_premium: bool,
}

pub struct CreateMovieHandler {
    movies: Arc<dyn MovieRepository>,
}

impl CreateMovieHandler {
    pub fn new(movies: Arc<dyn MovieRepository>) -> Self {
        Self { movies }
    }

    /// The creator sees the new entry as accessible.
    pub async fn handle(&self, cmd: CreateMovieCommand) -> Result<MovieView, DomainError> {
        let movie = Movie::new(cmd.name, cmd.cost, cmd.is_premium)?;
        self.movies.create(&movie).await?;
        tracing::info!(movie_id = %movie.id, name = %movie.name, "Movie created");
        Ok(MovieView::for_caller(movie, true))
    }
}
