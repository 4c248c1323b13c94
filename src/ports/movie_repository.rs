//! Movie repository port.

use crate::domain::foundation::{DomainError, MovieId};
use crate::domain::movie::Movie;
use async_trait::async_trait;

/// Repository port for catalog entries.
#[async_trait]
pub trait MovieRepository: Send + Sync {
    /// All movies ordered by name.
    async fn list(&self) -> Result<Vec<Movie>, DomainError>;

    /// Returns `None` if not found.
    async fn find_by_id(&self, id: &MovieId) -> Result<Option<Movie>, DomainError>;

    /// Save a new movie.
    async fn create(&self, movie: &Movie) -> Result<(), DomainError>;

    /// Update an existing movie.
    ///
    /// # Errors
    ///
    /// - `MovieNotFound` if the movie doesn't exist
    async fn update(&self, movie: &Movie) -> Result<(), DomainError>;

    /// Delete a movie.
    ///
    /// # Errors
    ///
    /// - `MovieNotFound` if the movie doesn't exist
    async fn delete(&self, id: &MovieId) -> Result<(), DomainError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn movie_repository_is_object_safe() {
        fn _accepts_dyn(_repo: &dyn MovieRepository) {}
    }
}
