//! HandlePaymentWebhookHandler - gateway-pushed payment confirmation.
//!
//! The HTTP layer checks the signature and decodes the body before this
//! handler runs, so it only ever sees authentic events.

use super::settlement::{PaymentSettlement, SettlementOutcome};
use crate::domain::foundation::{DomainError, PaymentReference};
use crate::domain::payment::WebhookEvent;

/// Command carrying a signature-checked webhook event.
#[derive(Debug, Clone)]
pub struct HandlePaymentWebhookCommand {
    pub event: WebhookEvent,
}

/// Handler for gateway webhooks.
pub struct HandlePaymentWebhookHandler {
    settlement: PaymentSettlement,
}

impl HandlePaymentWebhookHandler {
    pub fn new(settlement: PaymentSettlement) -> Self {
        Self { settlement }
    }

    /// Returns `true` only when this event settled the payment.
    ///
    /// Events other than a charge success, or without a reference, are
    /// acknowledged with `false` without touching the store.
    pub async fn handle(&self, cmd: HandlePaymentWebhookCommand) -> Result<bool, DomainError> {
        let Some(raw_reference) = cmd.event.charge_success_reference() else {
            tracing::debug!(event = %cmd.event.event, "Ignoring webhook event");
            return Ok(false);
        };
        let reference = PaymentReference::new(raw_reference)?;

        let outcome = self.settlement.settle_success(&reference, "webhook").await?;
        Ok(matches!(outcome, SettlementOutcome::Settled { .. }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::InMemoryPaymentRepository;
    use crate::application::handlers::payment::test_support::{
        pending_payment, CountingPaymentRepository, RecordingEntitlements,
    };
    use crate::domain::payment::{PaymentStatus, WebhookEventData, CHARGE_SUCCESS_EVENT};
    use crate::ports::PaymentRepository;
    use std::sync::Arc;

    fn event(name: &str, reference: Option<&str>) -> HandlePaymentWebhookCommand {
        HandlePaymentWebhookCommand {
            event: WebhookEvent {
                event: name.to_string(),
                data: reference.map(|r| WebhookEventData {
                    reference: r.to_string(),
                    status: Some("success".to_string()),
                    amount: None,
                    gateway_response: Some("Approved".to_string()),
                    customer_email: Some("buyer@example.com".to_string()),
                }),
            },
        }
    }

    async fn setup() -> (
        HandlePaymentWebhookHandler,
        InMemoryPaymentRepository,
        Arc<RecordingEntitlements>,
    ) {
        let payments = InMemoryPaymentRepository::new();
        payments.create(&pending_payment("REF123")).await.unwrap();
        let entitlements = Arc::new(RecordingEntitlements::new());
        let settlement =
            PaymentSettlement::new(Arc::new(payments.clone()), entitlements.clone(), 30);
        (HandlePaymentWebhookHandler::new(settlement), payments, entitlements)
    }

    #[tokio::test]
    async fn charge_success_settles_and_grants() {
        let (handler, payments, entitlements) = setup().await;

        let handled = handler
            .handle(event(CHARGE_SUCCESS_EVENT, Some("REF123")))
            .await
            .unwrap();

        assert!(handled);
        assert_eq!(entitlements.grants().len(), 1);
        let stored = payments
            .find_by_reference(&PaymentReference::new("REF123").unwrap())
            .await
            .unwrap()
            .unwrap();
        assert_eq!(stored.status, PaymentStatus::Success);
    }

    #[tokio::test]
    async fn redelivered_webhook_is_acknowledged_without_grant() {
        let (handler, _, entitlements) = setup().await;

        assert!(handler.handle(event(CHARGE_SUCCESS_EVENT, Some("REF123"))).await.unwrap());
        assert!(!handler.handle(event(CHARGE_SUCCESS_EVENT, Some("REF123"))).await.unwrap());
        assert_eq!(entitlements.grants().len(), 1);
    }

    #[tokio::test]
    async fn other_events_are_ignored_without_store_access() {
        let store = InMemoryPaymentRepository::new();
        store.create(&pending_payment("REF123")).await.unwrap();
        let payments = Arc::new(CountingPaymentRepository::new(store));
        let entitlements = Arc::new(RecordingEntitlements::new());
        let handler = HandlePaymentWebhookHandler::new(PaymentSettlement::new(
            payments.clone(),
            entitlements.clone(),
            30,
        ));

        assert!(!handler.handle(event("transfer.success", Some("REF123"))).await.unwrap());
        assert!(!handler.handle(event(CHARGE_SUCCESS_EVENT, None)).await.unwrap());

        assert_eq!(payments.calls(), 0);
        assert!(entitlements.grants().is_empty());
    }

    #[tokio::test]
    async fn unknown_reference_returns_false() {
        let (handler, _, entitlements) = setup().await;

        assert!(!handler.handle(event(CHARGE_SUCCESS_EVENT, Some("NOPE"))).await.unwrap());
        assert!(entitlements.grants().is_empty());
    }
}
