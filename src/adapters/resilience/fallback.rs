//! Outermost layer: degrade instead of failing when the gateway is unreachable.

use async_trait::async_trait;
use std::sync::Arc;

use crate::domain::payment::{
    InitializeTransactionResponse, VerifyTransactionResponse, WebhookEvent,
};
use crate::ports::{GatewayError, InitializeTransactionRequest, PaymentGateway};

/// Turns unavailability (transient failure or open circuit) into a
/// `status: false` response with a fixed message.
///
/// Every fallback is logged at error level since it means a customer-facing
/// payment step did not reach the gateway.
pub struct FallbackGateway {
    inner: Arc<dyn PaymentGateway>,
}

impl FallbackGateway {
    pub fn new(inner: Arc<dyn PaymentGateway>) -> Self {
        Self { inner }
    }
}

fn log_fallback(operation: &'static str, err: &GatewayError) {
    tracing::error!(
        operation,
        error_code = %err.code,
        error = %err.message,
        "Payment gateway unavailable, returning fallback response"
    );
}

#[async_trait]
impl PaymentGateway for FallbackGateway {
    async fn initialize_transaction(
        &self,
        request: InitializeTransactionRequest,
    ) -> Result<InitializeTransactionResponse, GatewayError> {
        match self.inner.initialize_transaction(request).await {
            Err(err) if err.is_unavailable() => {
                log_fallback("initialize", &err);
                Ok(InitializeTransactionResponse::unavailable())
            }
            other => other,
        }
    }

    async fn verify_transaction(
        &self,
        reference: &str,
    ) -> Result<VerifyTransactionResponse, GatewayError> {
        match self.inner.verify_transaction(reference).await {
            Err(err) if err.is_unavailable() => {
                log_fallback("verify", &err);
                Ok(VerifyTransactionResponse::unavailable())
            }
            other => other,
        }
    }

    fn verify_webhook_signature(&self, payload: &[u8], signature: &str) -> bool {
        self.inner.verify_webhook_signature(payload, signature)
    }

    fn parse_webhook_event(&self, payload: &[u8]) -> Result<WebhookEvent, GatewayError> {
        self.inner.parse_webhook_event(payload)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::resilience::test_support::{ScriptedGateway, Step};
    use crate::domain::payment::GATEWAY_UNAVAILABLE_MESSAGE;
    use crate::ports::GatewayErrorCode;

    #[tokio::test]
    async fn open_circuit_becomes_degraded_response() {
        let inner = Arc::new(ScriptedGateway::new(vec![Step::Fail(GatewayError::circuit_open())]));
        let gateway = FallbackGateway::new(inner);

        let response = gateway.verify_transaction("REF123").await.unwrap();
        assert!(!response.status);
        assert_eq!(response.message, GATEWAY_UNAVAILABLE_MESSAGE);
        assert!(response.data.is_none());
    }

    #[tokio::test]
    async fn timeout_on_initialize_becomes_degraded_response() {
        let inner = Arc::new(ScriptedGateway::new(vec![Step::Fail(GatewayError::timeout("slow"))]));
        let gateway = FallbackGateway::new(inner);

        let response = gateway
            .initialize_transaction(ScriptedGateway::init_request())
            .await
            .unwrap();
        assert!(!response.status);
        assert!(response.accepted().is_none());
    }

    #[tokio::test]
    async fn permanent_errors_pass_through() {
        let inner = Arc::new(ScriptedGateway::new(vec![Step::Fail(
            GatewayError::invalid_response("garbled"),
        )]));
        let gateway = FallbackGateway::new(inner);

        let err = gateway.verify_transaction("REF123").await.unwrap_err();
        assert_eq!(err.code, GatewayErrorCode::InvalidResponse);
    }
}
