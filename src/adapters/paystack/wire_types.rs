//! Paystack JSON shapes as they cross the wire.
//!
//! Amounts here are integers in kobo. Conversion to `Amount` happens in the
//! `From`/`TryFrom` impls below and nowhere else.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::Amount;
use crate::domain::payment::{
    InitializeTransactionData, VerifyTransactionData, WebhookEvent, WebhookEventData,
};
use crate::ports::GatewayError;

// ════════════════════════════════════════════════════════════════════════════════
// Requests
// ════════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Serialize)]
pub struct PaystackInitializeRequest {
    pub email: String,

    /// Amount in kobo.
    pub amount: i64,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub callback_url: Option<String>,
}

// ════════════════════════════════════════════════════════════════════════════════
// Responses
// ════════════════════════════════════════════════════════════════════════════════

/// Every Paystack API answer is wrapped in this envelope.
#[derive(Debug, Clone, Deserialize)]
pub struct PaystackEnvelope<T> {
    pub status: bool,
    #[serde(default)]
    pub message: String,
    pub data: Option<T>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PaystackInitializeData {
    pub authorization_url: String,
    pub access_code: String,
    pub reference: String,
}

impl From<PaystackInitializeData> for InitializeTransactionData {
    fn from(data: PaystackInitializeData) -> Self {
        Self {
            authorization_url: data.authorization_url,
            access_code: data.access_code,
            reference: data.reference,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct PaystackVerifyData {
    pub reference: String,
    pub status: String,

    /// Amount in kobo.
    pub amount: i64,

    #[serde(default)]
    pub gateway_response: Option<String>,
}

impl TryFrom<PaystackVerifyData> for VerifyTransactionData {
    type Error = GatewayError;

    fn try_from(data: PaystackVerifyData) -> Result<Self, Self::Error> {
        Ok(Self {
            amount: Amount::from_minor_units(data.amount)
                .map_err(|e| GatewayError::invalid_response(format!("Invalid amount: {}", e)))?,
            reference: data.reference,
            status: data.status,
            gateway_response: data.gateway_response,
        })
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Webhooks
// ════════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Deserialize)]
pub struct PaystackWebhook {
    pub event: String,
    #[serde(default)]
    pub data: Option<PaystackWebhookData>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PaystackWebhookData {
    #[serde(default)]
    pub reference: Option<String>,
    #[serde(default)]
    pub status: Option<String>,

    /// Amount in kobo.
    #[serde(default)]
    pub amount: Option<i64>,

    #[serde(default)]
    pub gateway_response: Option<String>,
    #[serde(default)]
    pub currency: Option<String>,
    #[serde(default)]
    pub customer: Option<PaystackCustomer>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PaystackCustomer {
    #[serde(default)]
    pub email: Option<String>,
}

impl From<PaystackWebhook> for WebhookEvent {
    fn from(webhook: PaystackWebhook) -> Self {
        let data = webhook.data.and_then(|data| {
            let reference = data.reference?;
            Some(WebhookEventData {
                reference,
                status: data.status,
                amount: data.amount.and_then(|kobo| Amount::from_minor_units(kobo).ok()),
                gateway_response: data.gateway_response,
                customer_email: data.customer.and_then(|c| c.email),
            })
        });

        WebhookEvent {
            event: webhook.event,
            data,
        }
    }
}
