//! Hard deadline for gateway calls, per attempt or per whole call.

use async_trait::async_trait;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use crate::domain::payment::{
    InitializeTransactionResponse, VerifyTransactionResponse, WebhookEvent,
};
use crate::ports::{GatewayError, InitializeTransactionRequest, PaymentGateway};

/// Fails a call with `GatewayErrorCode::Timeout` once `limit` elapses.
///
/// The inner future is dropped on expiry, which cancels the request.
pub struct TimeoutGateway {
    inner: Arc<dyn PaymentGateway>,
    limit: Duration,
}

impl TimeoutGateway {
    pub fn new(inner: Arc<dyn PaymentGateway>, limit: Duration) -> Self {
        Self { inner, limit }
    }

    async fn run<T>(
        &self,
        operation: &'static str,
        call: impl Future<Output = Result<T, GatewayError>>,
    ) -> Result<T, GatewayError> {
        match tokio::time::timeout(self.limit, call).await {
            Ok(result) => result,
            Err(_) => {
                tracing::warn!(
                    operation,
                    timeout_ms = self.limit.as_millis() as u64,
                    "Gateway call timed out"
                );
                Err(GatewayError::timeout(format!(
                    "Gateway {} exceeded {:?}",
                    operation, self.limit
                )))
            }
        }
    }
}

#[async_trait]
impl PaymentGateway for TimeoutGateway {
    async fn initialize_transaction(
        &self,
        request: InitializeTransactionRequest,
    ) -> Result<InitializeTransactionResponse, GatewayError> {
        self.run("initialize", self.inner.initialize_transaction(request))
            .await
    }

    async fn verify_transaction(
        &self,
        reference: &str,
    ) -> Result<VerifyTransactionResponse, GatewayError> {
        self.run("verify", self.inner.verify_transaction(reference))
            .await
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
    use crate::ports::GatewayErrorCode;

    #[tokio::test]
    async fn slow_call_times_out() {
        let inner = Arc::new(ScriptedGateway::new(vec![Step::Delay(Duration::from_millis(200))]));
        let gateway = TimeoutGateway::new(inner.clone(), Duration::from_millis(20));

        let err = gateway.verify_transaction("REF123").await.unwrap_err();
        assert_eq!(err.code, GatewayErrorCode::Timeout);
        assert_eq!(inner.calls(), 1);
    }

    #[tokio::test]
    async fn fast_call_passes_through() {
        let inner = Arc::new(ScriptedGateway::new(vec![Step::Succeed]));
        let gateway = TimeoutGateway::new(inner, Duration::from_secs(1));

        let response = gateway.verify_transaction("REF123").await.unwrap();
        assert!(response.is_successful_charge());
    }
}
