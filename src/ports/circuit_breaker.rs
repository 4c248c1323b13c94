//! CircuitBreaker port - stops hammering a failing dependency.
//!
//! ## States
//!
//! - **Closed**: Normal operation, requests flow through
//! - **Open**: Failure ratio exceeded, requests rejected immediately
//! - **Half-Open**: Break elapsed, a trial request is let through
//!
//! ## Transitions
//!
//! ```text
//! Closed --[failure ratio >= threshold with minimum throughput in window]--> Open
//! Open --[break_duration elapsed]--> Half-Open
//! Half-Open --[trial succeeds]--> Closed
//! Half-Open --[trial fails]--> Open
//! ```

use std::time::Duration;

/// Circuit breaker states.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CircuitState {
    /// Requests flow through to the dependency.
    Closed,

    /// Requests are rejected without calling the dependency.
    Open,

    /// A limited number of trial requests are allowed.
    HalfOpen,
}

impl CircuitState {
    /// Check if the circuit allows requests through.
    pub fn allows_requests(&self) -> bool {
        matches!(self, CircuitState::Closed | CircuitState::HalfOpen)
    }
}

/// Configuration for circuit breaker behavior.
#[derive(Debug, Clone, PartialEq)]
pub struct CircuitBreakerConfig {
    /// Share of failed calls in the window that opens the circuit.
    ///
    /// Default: 0.5
    pub failure_ratio: f64,

    /// Calls required in the window before the ratio is evaluated.
    ///
    /// Default: 5
    pub minimum_throughput: u32,

    /// Sliding window over which outcomes are counted.
    ///
    /// Default: 60 seconds
    pub sampling_window: Duration,

    /// How long the circuit stays open before a trial call.
    ///
    /// Default: 30 seconds
    pub break_duration: Duration,

    /// Concurrent trial calls allowed while half-open.
    ///
    /// Default: 1
    pub half_open_max_requests: u32,
}

impl Default for CircuitBreakerConfig {
    fn default() -> Self {
        Self {
            failure_ratio: 0.5,
            minimum_throughput: 5,
            sampling_window: Duration::from_secs(60),
            break_duration: Duration::from_secs(30),
            half_open_max_requests: 1,
        }
    }
}

/// Port for circuit breaker functionality.
///
/// Wrapping code asks `should_allow` before each call and reports the
/// outcome with `record_success` or `record_failure`. A call abandoned
/// before it finished reports `release_trial` instead.
pub trait CircuitBreaker: Send + Sync {
    /// Get the current state of the circuit.
    fn state(&self) -> CircuitState;

    /// Check if a request should be allowed through.
    ///
    /// May move Open to Half-Open once the break has elapsed, and reserves a
    /// trial slot when half-open.
    fn should_allow(&self) -> bool;

    /// Record a successful request.
    fn record_success(&self);

    /// Record a failed request.
    fn record_failure(&self);

    /// Give back a half-open trial slot whose call ended without an outcome.
    ///
    /// No-op unless the circuit is half-open with a slot in flight.
    fn release_trial(&self);

    /// Force reset the circuit to closed state.
    fn reset(&self);

    /// Get metrics about the circuit breaker.
    fn metrics(&self) -> CircuitBreakerMetrics;
}

/// Metrics about circuit breaker behavior.
#[derive(Debug, Clone, Default)]
pub struct CircuitBreakerMetrics {
    /// Current state
    pub state: Option<CircuitState>,

    /// Total successful requests since creation
    pub total_successes: u64,

    /// Total failed requests since creation
    pub total_failures: u64,

    /// Times the circuit has opened
    pub times_opened: u64,

    /// Calls currently inside the sampling window
    pub window_calls: u32,

    /// Failures currently inside the sampling window
    pub window_failures: u32,

    /// Time until circuit transitions to half-open (when open)
    pub time_until_half_open: Option<Duration>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn circuit_breaker_is_object_safe() {
        fn _accepts_dyn(_breaker: &dyn CircuitBreaker) {}
    }

    #[test]
    fn circuit_state_allows_requests() {
        assert!(CircuitState::Closed.allows_requests());
        assert!(CircuitState::HalfOpen.allows_requests());
        assert!(!CircuitState::Open.allows_requests());
    }

    #[test]
    fn default_config_values() {
        let config = CircuitBreakerConfig::default();
        assert_eq!(config.failure_ratio, 0.5);
        assert_eq!(config.minimum_throughput, 5);
        assert_eq!(config.sampling_window, Duration::from_secs(60));
        assert_eq!(config.break_duration, Duration::from_secs(30));
    }
}
