//! Resilience layers for the payment gateway.
//!
//! Each layer is itself a `PaymentGateway` wrapping another, composed
//! outermost first as:
//!
//! ```text
//! Fallback -> CircuitBreaker -> Deadline -> Retry -> Timeout -> Paystack
//! ```
//!
//! So a retry sequence counts as one call against the circuit, and each
//! individual attempt gets its own deadline. The outer deadline bounds the
//! whole retry sequence; it must expire before the HTTP request timeout so a
//! hung provider still reaches the breaker and the fallback.

mod circuit;
mod circuit_breaker;
mod fallback;
mod retry;
mod timeout;

pub use circuit::CircuitBreakerGateway;
pub use circuit_breaker::InMemoryCircuitBreaker;
pub use fallback::FallbackGateway;
pub use retry::{RetryGateway, RetryPolicy};
pub use timeout::TimeoutGateway;

use std::sync::Arc;
use std::time::Duration;

use crate::ports::{CircuitBreaker, CircuitBreakerConfig, PaymentGateway};

/// Settings for the whole chain.
#[derive(Debug, Clone, PartialEq)]
pub struct ResiliencePolicy {
    pub attempt_timeout: Duration,
    /// Budget for all attempts and backoff of one call
    pub call_deadline: Duration,
    pub retry: RetryPolicy,
    pub circuit: CircuitBreakerConfig,
}

impl Default for ResiliencePolicy {
    fn default() -> Self {
        Self {
            attempt_timeout: Duration::from_secs(10),
            call_deadline: Duration::from_secs(25),
            retry: RetryPolicy::default(),
            circuit: CircuitBreakerConfig::default(),
        }
    }
}

/// Wrap `inner` in the full chain, sharing `breaker` across calls.
pub fn resilient_gateway(
    inner: Arc<dyn PaymentGateway>,
    policy: &ResiliencePolicy,
    breaker: Arc<dyn CircuitBreaker>,
) -> Arc<dyn PaymentGateway> {
    let timed: Arc<dyn PaymentGateway> = Arc::new(TimeoutGateway::new(inner, policy.attempt_timeout));
    let retried: Arc<dyn PaymentGateway> = Arc::new(RetryGateway::new(timed, policy.retry.clone()));
    let bounded: Arc<dyn PaymentGateway> = Arc::new(TimeoutGateway::new(retried, policy.call_deadline));
    let guarded: Arc<dyn PaymentGateway> = Arc::new(CircuitBreakerGateway::new(bounded, breaker));
    Arc::new(FallbackGateway::new(guarded))
}

/// Same as [`resilient_gateway`] with a fresh breaker built from the policy.
pub fn resilient_gateway_with_policy(
    inner: Arc<dyn PaymentGateway>,
    policy: &ResiliencePolicy,
) -> Arc<dyn PaymentGateway> {
    let breaker = Arc::new(InMemoryCircuitBreaker::new(
        "paystack",
        policy.circuit.clone(),
    ));
    resilient_gateway(inner, policy, breaker)
}
