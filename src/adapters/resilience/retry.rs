//! Retry with exponential backoff and jitter.
//!
//! Only transient failures (network, timeout, 5xx, 429) are retried. The
//! delay before retry `n` (zero-based) is `base_delay * 2^n` plus a uniform
//! jitter in `[0, max_jitter]`.

use async_trait::async_trait;
use rand::Rng;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::sleep;

use crate::domain::payment::{
    InitializeTransactionResponse, VerifyTransactionResponse, WebhookEvent,
};
use crate::ports::{GatewayError, InitializeTransactionRequest, PaymentGateway};

/// Backoff settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Retries after the first attempt.
    pub max_retries: u32,
    pub base_delay: Duration,
    pub max_jitter: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: 3,
            base_delay: Duration::from_secs(2),
            max_jitter: Duration::from_millis(500),
        }
    }
}

impl RetryPolicy {
    /// Delay before retry number `retry` (zero-based), jitter excluded.
    pub fn backoff(&self, retry: u32) -> Duration {
        self.base_delay.saturating_mul(1u32 << retry.min(16))
    }

    fn delay_with_jitter(&self, retry: u32) -> Duration {
        let jitter_ms = self.max_jitter.as_millis() as u64;
        let jitter = if jitter_ms == 0 {
            0
        } else {
            rand::thread_rng().gen_range(0..=jitter_ms)
        };
        self.backoff(retry) + Duration::from_millis(jitter)
    }
}

pub struct RetryGateway {
    inner: Arc<dyn PaymentGateway>,
    policy: RetryPolicy,
}

impl RetryGateway {
    pub fn new(inner: Arc<dyn PaymentGateway>, policy: RetryPolicy) -> Self {
        Self { inner, policy }
    }

    async fn run<T, F, Fut>(&self, operation: &'static str, mut call: F) -> Result<T, GatewayError>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, GatewayError>>,
    {
        let mut retry = 0;
        loop {
            match call().await {
                Ok(value) => return Ok(value),
                Err(err) if err.is_transient() && retry < self.policy.max_retries => {
                    let delay = self.policy.delay_with_jitter(retry);
                    tracing::warn!(
                        operation,
                        attempt = retry + 1,
                        delay_ms = delay.as_millis() as u64,
                        error = %err,
                        "Retrying gateway call"
                    );
                    sleep(delay).await;
                    retry += 1;
                }
                Err(err) => return Err(err),
            }
        }
    }
}

#[async_trait]
impl PaymentGateway for RetryGateway {
    async fn initialize_transaction(
        &self,
        request: InitializeTransactionRequest,
    ) -> Result<InitializeTransactionResponse, GatewayError> {
        self.run("initialize", || {
            self.inner.initialize_transaction(request.clone())
        })
        .await
    }

    async fn verify_transaction(
        &self,
        reference: &str,
    ) -> Result<VerifyTransactionResponse, GatewayError> {
        self.run("verify", || self.inner.verify_transaction(reference))
            .await
    }

    fn verify_webhook_signature(&self, payload: &[u8], signature: &str) -> bool {
        self.inner.verify_webhook_signature(payload, signature)
    }

    fn parse_webhook_event(&self, payload: &[u8]) -> Result<WebhookEvent, GatewayError> {
        self.inner.parse_webhook_event(payload)
    }
}
