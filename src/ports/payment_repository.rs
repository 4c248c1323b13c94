//! Payment repository port.
//!
//! The store is the single arbiter of concurrent status changes: a
//! transition is a compare-and-set guarded by the payment's `version`, so two
//! racing settlers (client verify and gateway webhook) cannot both win.
//!
//! # Example
//!
//! ```ignore
//! if repo.try_transition_status(&reference, PaymentStatus::Success).await? {
//!     // This caller won the race; perform the one-time side effect.
//! }
//! ```

use crate::domain::foundation::{DomainError, PaymentReference, UserId};
use crate::domain::payment::{Payment, PaymentStatus};
use async_trait::async_trait;

/// Repository port for Payment persistence.
#[async_trait]
pub trait PaymentRepository: Send + Sync {
    /// Look up a payment by its gateway reference.
    ///
    /// Returns `None` if not found.
    async fn find_by_reference(
        &self,
        reference: &PaymentReference,
    ) -> Result<Option<Payment>, DomainError>;

    /// All payments of a user, newest `transaction_date` first.
    async fn find_by_user(&self, user_id: &UserId) -> Result<Vec<Payment>, DomainError>;

    /// Persist a new payment.
    ///
    /// # Errors
    ///
    /// - `DuplicateReference` if a payment with the same reference exists
    /// - `DatabaseError` on persistence failure
    async fn create(&self, payment: &Payment) -> Result<(), DomainError>;

    /// Atomically move the payment to `new_status`.
    ///
    /// Returns `Ok(true)` only for the caller whose write took effect.
    /// Returns `Ok(false)` without writing when the reference is unknown,
    /// the payment already has `new_status`, the move is not a legal
    /// transition, or another writer changed the row since it was loaded.
    ///
    /// # Errors
    ///
    /// - `DatabaseError` on persistence failure
    async fn try_transition_status(
        &self,
        reference: &PaymentReference,
        new_status: PaymentStatus,
    ) -> Result<bool, DomainError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn payment_repository_is_object_safe() {
        fn _accepts_dyn(_repo: &dyn PaymentRepository) {}
    }
}
