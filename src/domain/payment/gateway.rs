//! Gateway-facing value types.
//!
//! These mirror the gateway's response envelope `{status, message, data}` so
//! that controllers can hand the gateway's answer back to clients unchanged.
//! Amounts are already converted to major units here.

use crate::domain::foundation::Amount;
use serde::{Deserialize, Serialize};

/// Webhook event name for a confirmed charge.
pub const CHARGE_SUCCESS_EVENT: &str = "charge.success";

/// Transaction status the gateway reports for a confirmed charge.
pub const GATEWAY_SUCCESS: &str = "success";

/// Transaction status the gateway reports for a declined charge.
pub const GATEWAY_FAILED: &str = "failed";

/// Message returned to clients when the gateway cannot be reached.
pub const GATEWAY_UNAVAILABLE_MESSAGE: &str =
    "Payment service is temporarily unavailable. Please try again shortly.";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InitializeTransactionData {
    pub authorization_url: String,
    pub access_code: String,
    pub reference: String,
}

/// Result of starting a gateway transaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InitializeTransactionResponse {
    pub status: bool,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<InitializeTransactionData>,
}

impl InitializeTransactionResponse {
    /// Degraded answer used when the gateway is unreachable.
    pub fn unavailable() -> Self {
        Self {
            status: false,
            message: GATEWAY_UNAVAILABLE_MESSAGE.to_string(),
            data: None,
        }
    }

    /// Returns the data block only when the gateway accepted the request.
    pub fn accepted(&self) -> Option<&InitializeTransactionData> {
        if self.status {
            self.data.as_ref()
        } else {
            None
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerifyTransactionData {
    pub reference: String,
    pub status: String,
    pub amount: Amount,
    #[serde(default)]
    pub gateway_response: Option<String>,
}

/// Authoritative gateway view of a transaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerifyTransactionResponse {
    pub status: bool,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<VerifyTransactionData>,
}

impl VerifyTransactionResponse {
    /// Degraded answer used when the gateway is unreachable.
    pub fn unavailable() -> Self {
        Self {
            status: false,
            message: GATEWAY_UNAVAILABLE_MESSAGE.to_string(),
            data: None,
        }
    }

    /// True when the gateway confirms the charge succeeded.
    pub fn is_successful_charge(&self) -> bool {
        self.status
            && self
                .data
                .as_ref()
                .map(|d| d.status == GATEWAY_SUCCESS)
                .unwrap_or(false)
    }

    /// True when the gateway reports the charge as declined.
    pub fn is_failed_charge(&self) -> bool {
        self.status
            && self
                .data
                .as_ref()
                .map(|d| d.status == GATEWAY_FAILED)
                .unwrap_or(false)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WebhookEventData {
    pub reference: String,
    pub status: Option<String>,
    pub amount: Option<Amount>,
    pub gateway_response: Option<String>,
    pub customer_email: Option<String>,
}

/// Gateway push notification after signature validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WebhookEvent {
    pub event: String,
    pub data: Option<WebhookEventData>,
}

impl WebhookEvent {
    /// Reference of a charge-success event, if this is one.
    pub fn charge_success_reference(&self) -> Option<&str> {
        if self.event != CHARGE_SUCCESS_EVENT {
            return None;
        }
        self.data
            .as_ref()
            .map(|d| d.reference.trim())
            .filter(|r| !r.is_empty())
    }
}
