//! Password hashing port.

use crate::domain::foundation::DomainError;

/// Hashes and verifies account passwords.
pub trait PasswordHasher: Send + Sync {
    /// Produce a self-describing hash (algorithm, parameters and salt included).
    fn hash(&self, password: &str) -> Result<String, DomainError>;

    /// Check `password` against a stored hash. Malformed hashes verify as false.
    fn verify(&self, password: &str, hash: &str) -> bool;
}
