//! Shared settlement step for client verification and gateway webhooks.
//!
//! Both entry points funnel into the same compare-and-set on the payment
//! store. Only the caller whose transition takes effect grants premium, so a
//! payment confirmed by both paths grants exactly once.

use std::sync::Arc;

use crate::domain::foundation::{DomainError, PaymentReference};
use crate::domain::payment::PaymentStatus;
use crate::ports::{EntitlementService, PaymentRepository};

/// What a settlement attempt did locally.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettlementOutcome {
    /// This call moved the payment to Success.
    Settled { premium_granted: bool },

    /// Another call (or an earlier one) already settled it.
    AlreadySettled,

    /// The gateway confirmed a reference this system never recorded.
    UnknownReference,

    /// The gateway reported the charge as declined and the payment is now Failed.
    MarkedFailed,

    /// Nothing authoritative to record (abandoned, ongoing, or unavailable).
    NotSettled,
}

impl SettlementOutcome {
    /// True only for the call that performed the transition to Success.
    pub fn won(&self) -> bool {
        matches!(self, SettlementOutcome::Settled { .. })
    }
}

/// Runs the transition and the one-time entitlement grant.
#[derive(Clone)]
pub struct PaymentSettlement {
    payments: Arc<dyn PaymentRepository>,
    entitlements: Arc<dyn EntitlementService>,
    premium_duration_days: i64,
}

impl PaymentSettlement {
    pub fn new(
        payments: Arc<dyn PaymentRepository>,
        entitlements: Arc<dyn EntitlementService>,
        premium_duration_days: i64,
    ) -> Self {
        Self {
            payments,
            entitlements,
            premium_duration_days,
        }
    }

    /// Try to move `reference` to Success and grant premium on a win.
    ///
    /// Once the transition commits, the grant runs on its own task, so a
    /// dropped caller cannot leave a settled payment without premium.
    /// A failed grant after a won transition is logged and not rolled back;
    /// the payment stays Success and the grant must be repaired by hand.
    pub async fn settle_success(
        &self,
        reference: &PaymentReference,
        source: &'static str,
    ) -> Result<SettlementOutcome, DomainError> {
        let won = self
            .payments
            .try_transition_status(reference, PaymentStatus::Success)
            .await?;

        if !won {
            return self.explain_lost(reference, source).await;
        }

        let settlement = self.clone();
        let settled = reference.clone();
        let grant =
            tokio::spawn(async move { settlement.grant_after_win(&settled, source).await });

        match grant.await {
            Ok(outcome) => outcome,
            Err(err) => {
                tracing::error!(
                    reference = %reference,
                    source,
                    error = %err,
                    "Premium grant task aborted after settlement, re-grant manually"
                );
                Ok(SettlementOutcome::Settled {
                    premium_granted: false,
                })
            }
        }
    }

    /// Record an authoritative decline. Never grants anything.
    pub async fn mark_failed(
        &self,
        reference: &PaymentReference,
    ) -> Result<SettlementOutcome, DomainError> {
        if self
            .payments
            .try_transition_status(reference, PaymentStatus::Failed)
            .await?
        {
            tracing::info!(reference = %reference, "Payment marked failed");
            return Ok(SettlementOutcome::MarkedFailed);
        }
        Ok(SettlementOutcome::NotSettled)
    }

    async fn grant_after_win(
        &self,
        reference: &PaymentReference,
        source: &'static str,
    ) -> Result<SettlementOutcome, DomainError> {
        let Some(payment) = self.payments.find_by_reference(reference).await? else {
            tracing::error!(
                reference = %reference,
                source,
                "Payment vanished after settlement, premium not granted"
            );
            return Ok(SettlementOutcome::Settled {
                premium_granted: false,
            });
        };

        tracing::info!(
            reference = %reference,
            user_id = %payment.user_id,
            amount = %payment.amount,
            source,
            "Payment settled"
        );

        let premium_granted = match self
            .entitlements
            .grant_premium(&payment.user_id, self.premium_duration_days)
            .await
        {
            Ok(()) => true,
            Err(err) => {
                tracing::error!(
                    reference = %reference,
                    user_id = %payment.user_id,
                    error = %err,
                    "Premium grant failed after settlement, re-grant manually"
                );
                false
            }
        };

        Ok(SettlementOutcome::Settled { premium_granted })
    }

    async fn explain_lost(
        &self,
        reference: &PaymentReference,
        source: &'static str,
    ) -> Result<SettlementOutcome, DomainError> {
        match self.payments.find_by_reference(reference).await? {
            None => {
                tracing::warn!(
                    reference = %reference,
                    source,
                    "Gateway confirmed a payment with no local record"
                );
                Ok(SettlementOutcome::UnknownReference)
            }
            Some(payment) if payment.is_settled() => {
                tracing::info!(
                    reference = %reference,
                    source,
                    "Payment already settled, skipping grant"
                );
                Ok(SettlementOutcome::AlreadySettled)
            }
            Some(payment) => {
                // Lost to a concurrent writer; the next confirmation retries
                tracing::warn!(
                    reference = %reference,
                    status = %payment.status,
                    version = payment.version,
                    source,
                    "Settlement lost a version race, payment not settled"
                );
                Ok(SettlementOutcome::NotSettled)
            }
        }
    }
}
