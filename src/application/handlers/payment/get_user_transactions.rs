//! GetUserTransactionsHandler - payment history of the caller.

use serde::Serialize;
use std::sync::Arc;

use crate::domain::foundation::{Amount, DomainError, PaymentId, Timestamp, UserId};
use crate::domain::payment::{Payment, PaymentStatus};
use crate::ports::PaymentRepository;

/// Query for one user's payments.
#[derive(Debug, Clone)]
pub struct GetUserTransactionsQuery {
    pub user_id: UserId,
}

/// Read model of a payment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PaymentView {
    pub id: PaymentId,
    pub reference: String,
    pub amount: Amount,
    pub status: PaymentStatus,
    pub transaction_date: Timestamp,
}

impl From<Payment> for PaymentView {
    fn from(payment: Payment) -> Self {
        Self {
            id: payment.id,
            reference: payment.reference.as_str().to_string(),
            amount: payment.amount,
            status: payment.status,
            transaction_date: payment.transaction_date,
        }
    }
}

pub struct GetUserTransactionsHandler {
    payments: Arc<dyn PaymentRepository>,
}

impl GetUserTransactionsHandler {
    pub fn new(payments: Arc<dyn PaymentRepository>) -> Self {
        Self { payments }
    }

    /// Newest first.
    pub async fn handle(&self, query: GetUserTransactionsQuery) -> Result<Vec<PaymentView>, DomainError> {
        let payments = self.payments.find_by_user(&query.user_id).await?;
        Ok(payments.into_iter().map(PaymentView::from).collect())
    }
}
