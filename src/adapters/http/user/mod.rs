//! HTTP adapter for user accounts.
//!
//! - `POST /api/user/register`, `POST /api/user/login`
//! - `GET /api/user/current`
//! - `GET|PUT|DELETE /api/user/:id`
//! - `POST /api/user/refresh-token`, `POST /api/user/revoke-token`

pub mod dto;
pub mod handlers;
pub mod routes;

pub use routes::user_routes;
