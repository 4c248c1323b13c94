//! Request and response bodies for the payment endpoints.
//!
//! Gateway answers are returned to clients as the domain response types
//! themselves, so only requests and acknowledgements live here.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Body of `POST /initialize`.
#[derive(Debug, Clone, Deserialize)]
pub struct InitializePaymentRequest {
    /// Major currency units; rounded to two places.
    pub amount: Decimal,

    /// Billing email; defaults to the caller's account email.
    #[serde(default)]
    pub email: Option<String>,
}

/// Body returned to the gateway after a webhook.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WebhookAck {
    /// Whether this delivery settled a payment.
    pub handled: bool,
}
