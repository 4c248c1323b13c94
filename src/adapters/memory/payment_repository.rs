//! In-memory payment repository for tests and the `memory` database mode.
//!
//! Keeps the same compare-and-set contract as the PostgreSQL adapter: the
//! record is loaded, checked, and then written only if its version is still
//! the one that was loaded.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::foundation::{DomainError, ErrorCode, PaymentReference, StateMachine, UserId};
use crate::domain::payment::{Payment, PaymentStatus};
use crate::ports::PaymentRepository;

/// Payments keyed by gateway reference.
#[derive(Debug, Clone, Default)]
pub struct InMemoryPaymentRepository {
    payments: Arc<RwLock<HashMap<String, Payment>>>,
}

impl InMemoryPaymentRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored payments.
    pub async fn len(&self) -> usize {
        self.payments.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.payments.read().await.is_empty()
    }
}

#[async_trait]
impl PaymentRepository for InMemoryPaymentRepository {
    async fn find_by_reference(
        &self,
        reference: &PaymentReference,
    ) -> Result<Option<Payment>, DomainError> {
        Ok(self.payments.read().await.get(reference.as_str()).cloned())
    }

    async fn find_by_user(&self, user_id: &UserId) -> Result<Vec<Payment>, DomainError> {
        let mut payments: Vec<Payment> = self
            .payments
            .read()
            .await
            .values()
            .filter(|p| &p.user_id == user_id)
            .cloned()
            .collect();
        payments.sort_by(|a, b| b.transaction_date.cmp(&a.transaction_date));
        Ok(payments)
    }

    async fn create(&self, payment: &Payment) -> Result<(), DomainError> {
        let mut payments = self.payments.write().await;
        if payments.contains_key(payment.reference.as_str()) {
            return Err(DomainError::new(
                ErrorCode::DuplicateReference,
                format!("Payment with reference {} already exists", payment.reference),
            ));
        }
        payments.insert(payment.reference.as_str().to_string(), payment.clone());
        Ok(())
    }

    async fn try_transition_status(
        &self,
        reference: &PaymentReference,
        new_status: PaymentStatus,
    ) -> Result<bool, DomainError> {
        let loaded = self.payments.read().await.get(reference.as_str()).cloned();

        let Some(current) = loaded else {
            return Ok(false);
        };
        if !current.status.can_transition_to(&new_status) {
            return Ok(false);
        }

        // Other writers may run between the load and the conditional write,
        // as they would against a remote store.
        tokio::task::yield_now().await;

        let mut payments = self.payments.write().await;
        match payments.get_mut(reference.as_str()) {
            Some(stored) if stored.version == current.version => {
                stored.status = new_status;
                stored.version += 1;
                Ok(true)
            }
            _ => Ok(false),
        }
    }
}
