//! In-memory repository adapters.
//!
//! Used by tests and by the `memory` database mode for local development.
//! Not suitable for multi-instance deployments.

mod movie_repository;
mod payment_repository;
mod user_repository;

pub use movie_repository::InMemoryMovieRepository;
pub use payment_repository::InMemoryPaymentRepository;
pub use user_repository::InMemoryUserRepository;
