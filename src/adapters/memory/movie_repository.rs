//! In-memory movie repository.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::foundation::{DomainError, ErrorCode, MovieId};
use crate::domain::movie::Movie;
use crate::ports::MovieRepository;

#[derive(Debug, Clone, Default)]
pub struct InMemoryMovieRepository {
    movies: Arc<RwLock<HashMap<MovieId, Movie>>>,
}

impl InMemoryMovieRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

fn not_found(id: &MovieId) -> DomainError {
    DomainError::new(ErrorCode::MovieNotFound, format!("Movie {} not found", id))
}

#[async_trait]
impl MovieRepository for InMemoryMovieRepository {
    async fn list(&self) -> Result<Vec<Movie>, DomainError> {
        let mut movies: Vec<Movie> = self.movies.read().await.values().cloned().collect();
        movies.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(movies)
    }

    async fn find_by_id(&self, id: &MovieId) -> Result<Option<Movie>, DomainError> {
        Ok(self.movies.read().await.get(id).cloned())
    }

    async fn create(&self, movie: &Movie) -> Result<(), DomainError> {
        self.movies.write().await.insert(movie.id, movie.clone());
        Ok(())
    }

    async fn update(&self, movie: &Movie) -> Result<(), DomainError> {
        let mut movies = self.movies.write().await;
        match movies.get_mut(&movie.id) {
            Some(stored) => {
                *stored = movie.clone();
                Ok(())
            }
            None => Err(not_found(&movie.id)),
        }
    }

    async fn delete(&self, id: &MovieId) -> Result<(), DomainError> {
        self.movies
            .write()
            .await
            .remove(id)
            .map(|_| ())
            .ok_or_else(|| not_found(id))
    }
}
