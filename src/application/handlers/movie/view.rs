//! Movie read model.

use serde::Serialize;

use crate::domain::foundation::{Amount, MovieId};
use crate::domain::movie::Movie;

/// A movie as seen by one caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MovieView {
    pub id: MovieId,
    pub name: String,
    pub cost: Amount,
    pub is_premium: bool,

    /// Whether the caller may watch it.
    pub is_accessible: bool,
}

impl MovieView {
    pub fn for_caller(movie: Movie, caller_is_premium: bool) -> Self {
        let is_accessible = movie.is_accessible_to(caller_is_premium);
        Self {
            id: movie.id,
            name: movie.name,
            cost: movie.cost,
            is_premium: movie.is_premium,
            is_accessible,
        }
    }
}
