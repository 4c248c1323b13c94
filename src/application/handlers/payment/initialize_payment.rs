//! InitializePaymentHandler - starts a hosted checkout and records a Pending payment.

use std::sync::Arc;

use crate::domain::foundation::{Amount, DomainError, ErrorCode, PaymentReference, UserId};
use crate::domain::payment::{InitializeTransactionResponse, Payment};
use crate::ports::{InitializeTransactionRequest, PaymentGateway, PaymentRepository};

/// Command to start a payment for the authenticated user.
#[derive(Debug, Clone)]
pub struct InitializePaymentCommand {
    pub user_id: UserId,
    pub email: String,
    pub amount: Amount,
}

/// Handler for starting payments.
///
/// The gateway's answer is returned as-is. A Pending record is only created
/// when the gateway accepted the request; a duplicate reference means a
/// concurrent request already recorded it and is not an error.
pub struct InitializePaymentHandler {
    gateway: Arc<dyn PaymentGateway>,
    payments: Arc<dyn PaymentRepository>,
}

impl InitializePaymentHandler {
    pub fn new(gateway: Arc<dyn PaymentGateway>, payments: Arc<dyn PaymentRepository>) -> Self {
        Self { gateway, payments }
    }

    pub async fn handle(
        &self,
        cmd: InitializePaymentCommand,
    ) -> Result<InitializeTransactionResponse, DomainError> {
        if cmd.amount.is_zero() {
            return Err(DomainError::validation("amount", "Amount must be greater than zero"));
        }
        if cmd.email.trim().is_empty() {
            return Err(DomainError::validation("email", "Email is required"));
        }

        tracing::info!(user_id = %cmd.user_id, amount = %cmd.amount, "Initializing payment");

        let response = self
            .gateway
            .initialize_transaction(InitializeTransactionRequest {
                email: cmd.email.trim().to_string(),
                amount: cmd.amount,
            })
            .await?;

        let Some(gateway_reference) = response.accepted().map(|data| data.reference.clone()) else {
            tracing::error!(message = %response.message, "Gateway refused payment initialization");
            return Ok(response);
        };

        let reference = match PaymentReference::new(gateway_reference) {
            Ok(reference) => reference,
            Err(_) => {
                tracing::error!("Gateway accepted initialization without a reference");
                return Ok(response);
            }
        };

        let payment = Payment::pending(cmd.user_id, cmd.amount, reference);
        match self.payments.create(&payment).await {
            Ok(()) => tracing::info!(
                reference = %payment.reference,
                user_id = %payment.user_id,
                "Payment record created"
            ),
            Err(err) if err.code == ErrorCode::DuplicateReference => tracing::warn!(
                reference = %payment.reference,
                "Duplicate payment reference during initialization"
            ),
            Err(err) => tracing::error!(
                reference = %payment.reference,
                error = %err,
                "Failed to record initialized payment"
            ),
        }

        Ok(response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::InMemoryPaymentRepository;
    use crate::application::handlers::payment::test_support::{init_response, MockGateway};
    use crate::domain::payment::{PaymentStatus, GATEWAY_UNAVAILABLE_MESSAGE};
    use rust_decimal_macros::dec;

    fn command(user_id: UserId) -> InitializePaymentCommand {
        InitializePaymentCommand {
            user_id,
            email: "buyer@example.com".to_string(),
            amount: Amount::new(dec!(500.00)).unwrap(),
        }
    }

    #[tokio::test]
    async fn accepted_initialization_records_pending_payment() {
        let gateway = Arc::new(MockGateway::new());
        let payments = InMemoryPaymentRepository::new();
        let handler = InitializePaymentHandler::new(gateway.clone(), Arc::new(payments.clone()));
        let user_id = UserId::new();

        let response = handler.handle(command(user_id)).await.unwrap();

        assert!(response.status);
        let stored = payments
            .find_by_reference(&PaymentReference::new("REF123").unwrap())
            .await
            .unwrap()
            .unwrap();
        assert_eq!(stored.status, PaymentStatus::Pending);
        assert_eq!(stored.amount, Amount::new(dec!(500.00)).unwrap());
        assert_eq!(stored.user_id, user_id);
        assert_eq!(gateway.init_requests()[0].email, "buyer@example.com");
    }

    #[tokio::test]
    async fn duplicate_reference_is_not_an_error() {
        let payments = InMemoryPaymentRepository::new();
        let handler = InitializePaymentHandler::new(
            Arc::new(MockGateway::new()),
            Arc::new(payments.clone()),
        );

        handler.handle(command(UserId::new())).await.unwrap();
        let second = handler.handle(command(UserId::new())).await.unwrap();

        assert!(second.status);
        assert_eq!(payments.len().await, 1);
    }

    #[tokio::test]
    async fn refused_initialization_creates_nothing() {
        let refused = InitializeTransactionResponse {
            status: false,
            message: "Invalid key".to_string(),
            data: None,
        };
        let payments = InMemoryPaymentRepository::new();
        let handler = InitializePaymentHandler::new(
            Arc::new(MockGateway::new().with_init(Ok(refused))),
            Arc::new(payments.clone()),
        );

        let response = handler.handle(command(UserId::new())).await.unwrap();

        assert!(!response.status);
        assert!(payments.is_empty().await);
    }

    #[tokio::test]
    async fn degraded_gateway_response_is_passed_through() {
        let payments = InMemoryPaymentRepository::new();
        let handler = InitializePaymentHandler::new(
            Arc::new(MockGateway::new().with_init(Ok(InitializeTransactionResponse::unavailable()))),
            Arc::new(payments.clone()),
        );

        let response = handler.handle(command(UserId::new())).await.unwrap();

        assert_eq!(response.message, GATEWAY_UNAVAILABLE_MESSAGE);
        assert!(payments.is_empty().await);
    }

    #[tokio::test]
    async fn zero_amount_is_rejected_before_gateway() {
        let gateway = Arc::new(MockGateway::new());
        let handler = InitializePaymentHandler::new(
            gateway.clone(),
            Arc::new(InMemoryPaymentRepository::new()),
        );
        let mut cmd = command(UserId::new());
        cmd.amount = Amount::ZERO;

        let err = handler.handle(cmd).await.unwrap_err();

        assert_eq!(err.code, ErrorCode::ValidationFailed);
        assert!(gateway.init_requests().is_empty());
    }

    #[tokio::test]
    async fn blank_gateway_reference_is_not_recorded() {
        let payments = InMemoryPaymentRepository::new();
        let handler = InitializePaymentHandler::new(
            Arc::new(MockGateway::new().with_init(Ok(init_response("  ")))),
            Arc::new(payments.clone()),
        );

        let response = handler.handle(command(UserId::new())).await.unwrap();

        assert!(response.status);
        assert!(payments.is_empty().await);
    }
}
