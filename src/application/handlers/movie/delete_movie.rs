//! DeleteMovieHandler - removes a catalog entry.

use std::sync::Arc;

use crate::domain::foundation::{DomainError, MovieId};
use crate::ports::MovieRepository;

#[derive(Debug, Clone)]
pub struct DeleteMovieCommand {
    pub movie_id: MovieId,
}

pub struct DeleteMovieHandler {
    movies: Arc<dyn MovieRepository>,
}

impl DeleteMovieHandler {
    pub fn new(movies: Arc<dyn MovieRepository>) -> Self {
        Self { movies }
    }

    /// Fails with `MovieNotFound` for an unknown id.
    pub async fn handle(&self, cmd: DeleteMovieCommand) -> Result<(), DomainError> {
        self.movies.delete(&cmd.movie_id).await?;
        tracing::info!(movie_id = %cmd.movie_id, "Movie deleted");
        Ok(())
    }
}
