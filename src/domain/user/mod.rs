//! User account domain.
//!
//! Registration, credentials, refresh tokens and the premium window that
//! payments unlock.

mod account;

pub use account::{normalize_email, validate_password, UserAccount, MIN_PASSWORD_LENGTH};
