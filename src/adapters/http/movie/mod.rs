//! HTTP adapter for the movie catalog.
//!
//! - `GET /api/v1/movies` - List the catalog (optional auth)
//! - `POST /api/v1/movies` - Add a movie
//! - `GET|PUT|DELETE /api/v1/movies/:id` - Read, replace or remove one movie

pub mod dto;
pub mod handlers;
pub mod routes;

pub use routes::movie_routes;
