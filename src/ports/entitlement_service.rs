//! Entitlement port - premium access on a user record.
//!
//! Granting is idempotent in effect: each grant resets the expiry to
//! `now + duration_days`. The payment flow still calls it at most once per
//! settled payment.

use crate::domain::foundation::{DomainError, UserId};
use async_trait::async_trait;

/// Port for reading and granting premium access.
#[async_trait]
pub trait EntitlementService: Send + Sync {
    /// True while the user's premium window is open.
    ///
    /// Unknown users are not premium.
    async fn is_premium(&self, user_id: &UserId) -> Result<bool, DomainError>;

    /// Open the premium window for `duration_days` from now.
    ///
    /// # Errors
    ///
    /// - `UserNotFound` if the user does not exist
    /// - `DatabaseError` on persistence failure
    async fn grant_premium(&self, user_id: &UserId, duration_days: i64) -> Result<(), DomainError>;
}
