//! Payment aggregate entity.
//!
//! # Invariants
//!
//! - `reference` is globally unique and never changes
//! - `id`, `user_id`, `amount` and `transaction_date` are fixed at creation
//! - `status` only moves through `PaymentRepository::try_transition_status`
//! - `version` increases by one on every persisted change

use crate::domain::foundation::{Amount, PaymentId, PaymentReference, Timestamp, UserId};
use serde::{Deserialize, Serialize};

use super::PaymentStatus;

/// Version assigned to a freshly created payment.
pub const INITIAL_VERSION: i64 = 1;

/// One payment attempt, keyed by the gateway reference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Payment {
    pub id: PaymentId,
    pub user_id: UserId,
    pub amount: Amount,
    pub reference: PaymentReference,
    pub status: PaymentStatus,
    pub transaction_date: Timestamp,

    /// Optimistic concurrency token.
    pub version: i64,
}

impl Payment {
    /// Creates a pending payment for a freshly initialized gateway transaction.
    pub fn pending(user_id: UserId, amount: Amount, reference: PaymentReference) -> Self {
        Self {
            id: PaymentId::new(),
            user_id,
            amount,
            reference,
            status: PaymentStatus::Pending,
            transaction_date: Timestamp::now(),
            version: INITIAL_VERSION,
        }
    }

    pub fn is_settled(&self) -> bool {
        self.status == PaymentStatus::Success
    }
}
