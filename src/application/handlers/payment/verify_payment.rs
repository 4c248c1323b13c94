//! VerifyPaymentHandler - client-driven confirmation of a payment.

use std::sync::Arc;

use super::settlement::{PaymentSettlement, SettlementOutcome};
use crate::domain::foundation::{DomainError, PaymentReference};
use crate::domain::payment::VerifyTransactionResponse;
use crate::ports::PaymentGateway;

/// Command to verify a payment by its gateway reference.
#[derive(Debug, Clone)]
pub struct VerifyPaymentCommand {
    pub reference: String,
}

/// Gateway answer plus what the verification did locally.
#[derive(Debug, Clone)]
pub struct VerifyPaymentResult {
    /// Returned to the client verbatim.
    pub response: VerifyTransactionResponse,
    pub settlement: SettlementOutcome,
}

/// Handler for payment verification.
pub struct VerifyPaymentHandler {
    gateway: Arc<dyn PaymentGateway>,
    settlement: PaymentSettlement,
}

impl VerifyPaymentHandler {
    pub fn new(gateway: Arc<dyn PaymentGateway>, settlement: PaymentSettlement) -> Self {
        Self { gateway, settlement }
    }

    pub async fn handle(&self, cmd: VerifyPaymentCommand) -> Result<VerifyPaymentResult, DomainError> {
        let reference = PaymentReference::new(cmd.reference)?;

        tracing::info!(reference = %reference, "Verifying payment");
        let response = self.gateway.verify_transaction(reference.as_str()).await?;

        let settlement = if response.is_successful_charge() {
            self.settlement.settle_success(&reference, "verify").await?
        } else if response.is_failed_charge() {
            self.settlement.mark_failed(&reference).await?
        } else {
            tracing::info!(
                reference = %reference,
                message = %response.message,
                "Payment not confirmed by gateway"
            );
            SettlementOutcome::NotSettled
        };

        Ok(VerifyPaymentResult {
            response,
            settlement,
        })
    }
}
