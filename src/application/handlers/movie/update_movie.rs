//! UpdateMovieHandler - replaces a catalog entry's fields.

use std::sync::Arc;

use super::MovieView;
use crate::domain::foundation::{Amount, DomainError, ErrorCode, MovieId};
use crate::ports::MovieRepository;

#[derive(Debug, Clone)]
pub struct UpdateMovieCommand {
    pub movie_id: MovieId,
    pub name: String,
    pub cost: Amount,
    pub is_premium: bool,
}

pub struct UpdateMovieHandler {
    movies: Arc<dyn MovieRepository>,
}

impl UpdateMovieHandler {
    pub fn new(movies: Arc<dyn MovieRepository>) -> Self {
        Self { movies }
    }

    pub async fn handle(&self, cmd: UpdateMovieCommand) -> Result<MovieView, DomainError> {
        let mut movie = self
            .movies
            .find_by_id(&cmd.movie_id)
            .await?
            .ok_or_else(|| {
                DomainError::new(
                    ErrorCode::MovieNotFound,
                    format!("Movie {} not found", cmd.movie_id),
                )
            })?;

        movie.update(cmd.name, cmd.cost, cmd.is_premium)?;
        self.movies.update(&movie).await?;
        tracing::info!(movie_id = %movie.id, "Movie updated");
        Ok(MovieView::for_caller(movie, true))
    }
}
