//! Circuit-breaking gateway layer.

use async_trait::async_trait;
use std::future::Future;
use std::sync::Arc;

use crate::domain::payment::{
    InitializeTransactionResponse, VerifyTransactionResponse, WebhookEvent,
};
use crate::ports::{CircuitBreaker, GatewayError, InitializeTransactionRequest, PaymentGateway};

/// Rejects calls with `CircuitOpen` while the breaker is open.
///
/// Only transient failures count against the circuit; a gateway-level
/// refusal (`status: false`) or a malformed body is a healthy round-trip.
pub struct CircuitBreakerGateway {
    inner: Arc<dyn PaymentGateway>,
    breaker: Arc<dyn CircuitBreaker>,
}

impl CircuitBreakerGateway {
    pub fn new(inner: Arc<dyn PaymentGateway>, breaker: Arc<dyn CircuitBreaker>) -> Self {
        Self { inner, breaker }
    }

    async fn run<T>(
        &self,
        operation: &'static str,
        call: impl Future<Output = Result<T, GatewayError>>,
    ) -> Result<T, GatewayError> {
        if !self.breaker.should_allow() {
            tracing::warn!(operation, "Gateway call short-circuited");
            return Err(GatewayError::circuit_open());
        }

        let mut admission = Admission {
            breaker: self.breaker.as_ref(),
            operation,
            reported: false,
        };
        let result = call.await;
        admission.reported = true;
        match &result {
            Err(err) if err.is_transient() => self.breaker.record_failure(),
            _ => self.breaker.record_success(),
        }
        result
    }
}

/// Holds the slot granted by `should_allow` until an outcome is reported.
///
/// Dropping the call future mid-flight releases a half-open trial slot
/// instead of leaking it.
struct Admission<'a> {
    breaker: &'a dyn CircuitBreaker,
    operation: &'static str,
    reported: bool,
}

impl Drop for Admission<'_> {
    fn drop(&mut self) {
        if !self.reported {
            tracing::warn!(operation = self.operation, "Gateway call abandoned before completion");
            self.breaker.release_trial();
        }
    }
}

#[async_trait]
impl PaymentGateway for CircuitBreakerGateway {
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
