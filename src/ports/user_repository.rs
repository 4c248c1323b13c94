//! User account repository port.

use crate::domain::foundation::{DomainError, Timestamp, UserId};
use crate::domain::user::UserAccount;
use async_trait::async_trait;

/// Repository port for user accounts.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Save a new account.
    ///
    /// # Errors
    ///
    /// - `Conflict` if the email is already registered
    /// - `DatabaseError` on persistence failure
    async fn create(&self, user: &UserAccount) -> Result<(), DomainError>;

    /// Replace an existing account.
    ///
    /// # Errors
    ///
    /// - `UserNotFound` if the account doesn't exist
    /// - `Conflict` if the new email belongs to another account
    async fn update(&self, user: &UserAccount) -> Result<(), DomainError>;

    async fn find_by_id(&self, id: &UserId) -> Result<Option<UserAccount>, DomainError>;

    /// Lookup by normalized (lowercase) email.
    async fn find_by_email(&self, email: &str) -> Result<Option<UserAccount>, DomainError>;

    async fn find_by_refresh_token(&self, token: &str) -> Result<Option<UserAccount>, DomainError>;

    /// Set the premium flag and expiry in a single write.
    ///
    /// # Errors
    ///
    /// - `UserNotFound` if the account doesn't exist
    async fn set_premium_until(&self, id: &UserId, expires_at: Timestamp) -> Result<(), DomainError>;

    /// Delete an account. Deleting a missing account is not an error.
    async fn delete(&self, id: &UserId) -> Result<(), DomainError>;
}
