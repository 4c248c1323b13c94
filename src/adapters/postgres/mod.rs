//! PostgreSQL adapters - Database implementations for repository ports.
//!
//! - `PostgresPaymentRepository` - Payments with version-guarded status updates
//! - `PostgresMovieRepository` - Catalog entries
//! - `PostgresUserRepository` - Accounts and premium window

mod movie_repository;
mod payment_repository;
mod user_repository;

pub use movie_repository::PostgresMovieRepository;
pub use payment_repository::PostgresPaymentRepository;
pub use user_repository::PostgresUserRepository;
