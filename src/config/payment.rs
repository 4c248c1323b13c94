//! Payment configuration

use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;
use crate::adapters::paystack::{PaystackConfig, DEFAULT_BASE_URL};
use crate::adapters::resilience::{ResiliencePolicy, RetryPolicy};
use crate::ports::CircuitBreakerConfig;

/// Payment configuration (Paystack)
#[derive(Clone, Deserialize)]
pub struct PaymentConfig {
    /// Paystack secret key; also signs webhooks
    pub paystack_secret_key: String,

    /// Where checkout redirects the customer
    #[serde(default)]
    pub callback_url: Option<String>,

    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,

    /// Length of the premium window granted per successful payment
    #[serde(default = "default_premium_duration_days")]
    pub premium_duration_days: i64,

    #[serde(default)]
    pub resilience: ResilienceConfig,
}

impl std::fmt::Debug for PaymentConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PaymentConfig")
            .field("paystack_secret_key", &"[REDACTED]")
            .field("callback_url", &self.callback_url)
            .field("api_base_url", &self.api_base_url)
            .field("premium_duration_days", &self.premium_duration_days)
            .field("resilience", &self.resilience)
            .finish()
    }
}

impl PaymentConfig {
    pub fn is_test_mode(&self) -> bool {
        self.paystack_secret_key.starts_with("sk_test_")
    }

    pub fn is_live_mode(&self) -> bool {
        self.paystack_secret_key.starts_with("sk_live_")
    }

    pub fn to_paystack_config(&self) -> PaystackConfig {
        let config = PaystackConfig::new(self.paystack_secret_key.clone())
            .with_base_url(self.api_base_url.clone());
        match &self.callback_url {
            Some(url) => config.with_callback_url(url.clone()),
            None => config,
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.paystack_secret_key.is_empty() {
            return Err(ValidationError::MissingRequired("PAYMENT__PAYSTACK_SECRET_KEY"));
        }
        if !self.paystack_secret_key.starts_with("sk_") {
            return Err(ValidationError::InvalidPaystackKey);
        }
        if self.premium_duration_days <= 0 {
            return Err(ValidationError::InvalidPremiumDuration);
        }
        self.resilience.validate()
    }
}

/// Gateway timeout, retry and circuit breaker settings.
#[derive(Debug, Clone, Deserialize)]
pub struct ResilienceConfig {
    /// Hard deadline per gateway attempt
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Deadline for a whole call including retries; must stay below
    /// `server.request_timeout_secs`
    #[serde(default = "default_deadline_secs")]
    pub deadline_secs: u64,

    #[serde(default = "default_max_retries")]
    pub max_retries: u32,

    /// First retry delay; doubles per retry
    #[serde(default = "default_base_delay_ms")]
    pub base_delay_ms: u64,

    #[serde(default = "default_max_jitter_ms")]
    pub max_jitter_ms: u64,

    #[serde(default = "default_failure_ratio")]
    pub failure_ratio: f64,

    #[serde(default = "default_minimum_throughput")]
    pub minimum_throughput: u32,

    #[serde(default = "default_sampling_window_secs")]
    pub sampling_window_secs: u64,

    #[serde(default = "default_break_duration_secs")]
    pub break_duration_secs: u64,
}

impl ResilienceConfig {
    pub fn to_policy(&self) -> ResiliencePolicy {
        ResiliencePolicy {
            attempt_timeout: Duration::from_secs(self.timeout_secs),
            call_deadline: Duration::from_secs(self.deadline_secs),
            retry: RetryPolicy {
                max_retries: self.max_retries,
                base_delay: Duration::from_millis(self.base_delay_ms),
                max_jitter: Duration::from_millis(self.max_jitter_ms),
            },
            circuit: CircuitBreakerConfig {
                failure_ratio: self.failure_ratio,
                minimum_throughput: self.minimum_throughput,
                sampling_window: Duration::from_secs(self.sampling_window_secs),
                break_duration: Duration::from_secs(self.break_duration_secs),
                ..CircuitBreakerConfig::default()
            },
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.timeout_secs == 0 {
            return Err(ValidationError::InvalidResilience("timeout_secs must be positive"));
        }
        if self.deadline_secs == 0 {
            return Err(ValidationError::InvalidResilience("deadline_secs must be positive"));
        }
        if !(self.failure_ratio > 0.0 && self.failure_ratio <= 1.0) {
            return Err(ValidationError::InvalidResilience("failure_ratio must be in (0, 1]"));
        }
        if self.minimum_throughput == 0 {
            return Err(ValidationError::InvalidResilience("minimum_throughput must be positive"));
        }
        if self.sampling_window_secs == 0 || self.break_duration_secs == 0 {
            return Err(ValidationError::InvalidResilience("circuit durations must be positive"));
        }
        Ok(())
    }
}

impl Default for ResilienceConfig {
    fn default() -> Self {
        Self {
            timeout_secs: default_timeout_secs(),
            deadline_secs: default_deadline_secs(),
            max_retries: default_max_retries(),
            base_delay_ms: default_base_delay_ms(),
            max_jitter_ms: default_max_jitter_ms(),
            failure_ratio: default_failure_ratio(),
            minimum_throughput: default_minimum_throughput(),
            sampling_window_secs: default_sampling_window_secs(),
            break_duration_secs: default_break_duration_secs(),
        }
    }
}

fn default_api_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_premium_duration_days() -> i64 {
    30
}

fn default_timeout_secs() -> u64 {
    10
}

fn default_deadline_secs() -> u64 {
    25
}

fn default_max_retries() -> u32 {
    3
}

fn default_base_delay_ms() -> u64 {
    2000
}

fn default_max_jitter_ms() -> u64 {
    500
}

fn default_failure_ratio() -> f64 {
    0.5
}

fn default_minimum_throughput() -> u32 {
    5
}

fn default_sampling_window_secs() -> u64 {
    60
}

fn default_break_duration_secs() -> u64 {
    30
}
