//! Authentication adapters.
//!
//! - `jwt` - HS256 access tokens (issuing and validation) plus opaque refresh tokens
//! - `password` - Argon2 password hashing
//! - `mock` - Token-table validator for tests

mod jwt;
mod mock;
mod password;

pub use jwt::{JwtConfig, JwtTokenService};
pub use mock::MockSessionValidator;
pub use password::Argon2PasswordHasher;
