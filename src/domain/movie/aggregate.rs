//! Movie catalog entry.

use crate::domain::foundation::{Amount, MovieId, ValidationError};
use serde::{Deserialize, Serialize};

/// A catalog entry. Premium movies are only accessible to premium users.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Movie {
    pub id: MovieId,
    pub name: String,
    pub cost: Amount,
    pub is_premium: bool,
}

impl Movie {
    /// Creates a movie, validating its name.
    pub fn new(name: impl Into<String>, cost: Amount, is_premium: bool) -> Result<Self, ValidationError> {
        Ok(Self {
            id: MovieId::new(),
            name: validate_name(name.into())?,
            cost,
            is_premium,
        })
    }

    /// Replaces the editable fields.
    pub fn update(
        &mut self,
        name: impl Into<String>,
        cost: Amount,
        is_premium: bool,
    ) -> Result<(), ValidationError> {
        self.name = validate_name(name.into())?;
        self.cost = cost;
        self.is_premium = is_premium;
        Ok(())
    }

    /// Whether a caller with the given premium standing may watch this movie.
    pub fn is_accessible_to(&self, caller_is_premium: bool) -> bool {
        !self.is_premium || caller_is_premium
    }
}

fn validate_name(name: String) -> Result<String, ValidationError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::empty_field("name"));
    }
    Ok(trimmed.to_string())
}
