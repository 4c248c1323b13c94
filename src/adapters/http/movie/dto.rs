//! Request bodies for the movie endpoints.

use rust_decimal::Decimal;
use serde::Deserialize;

/// Body of `POST /` and `PUT /:id`.
#[derive(Debug, Clone, Deserialize)]
pub struct MovieRequest {
    pub name: String,
    pub cost: Decimal,
    #[serde(default)]
    pub is_premium: bool,
}
