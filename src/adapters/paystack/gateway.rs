//! Paystack payment gateway adapter.
//!
//! Implements `PaymentGateway` over the Paystack REST API.
//!
//! # Security
//!
//! - Webhooks are signed with HMAC-SHA512 over the raw body, keyed by the
//!   secret key, hex-encoded in `x-paystack-signature`
//! - Signatures are compared in constant time
//! - The secret key is held as a `secrecy::SecretString`
//!
//! # Configuration
//!
//! ```ignore
//! let config = PaystackConfig::new(secret_key).with_callback_url(url);
//! let gateway = PaystackGateway::new(config);
//! ```

use async_trait::async_trait;
use hmac::{Hmac, Mac};
use reqwest::StatusCode;
use secrecy::{ExposeSecret, SecretString};
use serde::de::DeserializeOwned;
use sha2::Sha512;
use subtle::ConstantTimeEq;

use crate::domain::payment::{
    InitializeTransactionResponse, VerifyTransactionData, VerifyTransactionResponse, WebhookEvent,
};
use crate::ports::{GatewayError, GatewayErrorCode, InitializeTransactionRequest, PaymentGateway};

use super::wire_types::{
    PaystackEnvelope, PaystackInitializeData, PaystackInitializeRequest, PaystackVerifyData,
    PaystackWebhook,
};

type HmacSha512 = Hmac<Sha512>;

/// Header carrying the webhook signature.
pub const SIGNATURE_HEADER: &str = "x-paystack-signature";

/// Default Paystack API base URL.
pub const DEFAULT_BASE_URL: &str = "https://api.paystack.co";

/// Paystack API configuration.
#[derive(Clone)]
pub struct PaystackConfig {
    /// Secret key (sk_live_... or sk_test_...). Also signs webhooks.
    secret_key: SecretString,

    /// Base URL for the API.
    api_base_url: String,

    /// Where Paystack redirects the customer after checkout.
    callback_url: Option<String>,
}

impl PaystackConfig {
    /// Create a new Paystack configuration.
    pub fn new(secret_key: impl Into<String>) -> Self {
        Self {
            secret_key: SecretString::new(secret_key.into()),
            api_base_url: DEFAULT_BASE_URL.to_string(),
            callback_url: None,
        }
    }

    /// Set a custom API base URL (for testing).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.api_base_url = url.into().trim_end_matches('/').to_string();
        self
    }

    /// Set the checkout callback URL.
    pub fn with_callback_url(mut self, url: impl Into<String>) -> Self {
        let url = url.into();
        self.callback_url = if url.trim().is_empty() { None } else { Some(url) };
        self
    }
}

/// Paystack payment gateway adapter.
pub struct PaystackGateway {
    config: PaystackConfig,
    http_client: reqwest::Client,
}

impl PaystackGateway {
    /// Create a new Paystack adapter with the given configuration.
    pub fn new(config: PaystackConfig) -> Self {
        Self {
            config,
            http_client: reqwest::Client::new(),
        }
    }

    /// Hex-encoded HMAC-SHA512 of `payload` under the secret key.
    pub fn sign(&self, payload: &[u8]) -> String {
        compute_signature(self.config.secret_key.expose_secret(), payload)
    }

    /// Classify the HTTP answer and decode the envelope.
    ///
    /// Paystack reports business refusals (bad reference, invalid amount) as
    /// 4xx with a `{status: false}` envelope; those are returned as `Ok` so the
    /// caller can hand them back unchanged.
    async fn read_envelope<T: DeserializeOwned>(
        response: reqwest::Response,
        operation: &'static str,
    ) -> Result<PaystackEnvelope<T>, GatewayError> {
        let status = response.status();

        if status.is_server_error() {
            let body = response.text().await.unwrap_or_default();
            tracing::warn!(operation, http_status = status.as_u16(), body = %body, "Paystack server error");
            return Err(GatewayError::server(
                status.as_u16(),
                format!("Paystack {} failed with {}", operation, status),
            ));
        }

        if status == StatusCode::TOO_MANY_REQUESTS {
            return Err(GatewayError::new(
                GatewayErrorCode::RateLimited,
                format!("Paystack {} rate limited", operation),
            )
            .with_http_status(status.as_u16()));
        }

        if status == StatusCode::UNAUTHORIZED {
            tracing::error!(operation, "Paystack rejected the secret key");
            return Err(GatewayError::new(
                GatewayErrorCode::AuthenticationError,
                "Paystack rejected the secret key",
            )
            .with_http_status(status.as_u16()));
        }

        response.json::<PaystackEnvelope<T>>().await.map_err(|e| {
            if e.is_timeout() {
                return GatewayError::timeout(e.to_string());
            }
            GatewayError::invalid_response(format!(
                "Failed to parse Paystack {} response: {}",
                operation, e
            ))
            .with_http_status(status.as_u16())
        })
    }

    fn transport_error(e: reqwest::Error) -> GatewayError {
        if e.is_timeout() {
            GatewayError::timeout(e.to_string())
        } else {
            GatewayError::network(e.to_string())
        }
    }
}

/// Hex-encoded HMAC-SHA512 of `payload` keyed by `secret`.
pub fn compute_signature(secret: &str, payload: &[u8]) -> String {
    let mut mac =
        HmacSha512::new_from_slice(secret.as_bytes()).expect("HMAC can take key of any size");
    mac.update(payload);
    hex::encode(mac.finalize().into_bytes())
}

#[async_trait]
impl PaymentGateway for PaystackGateway {
    async fn initialize_transaction(
        &self,
        request: InitializeTransactionRequest,
    ) -> Result<InitializeTransactionResponse, GatewayError> {
        let url = format!("{}/transaction/initialize", self.config.api_base_url);
        let body = PaystackInitializeRequest {
            email: request.email,
            amount: request.amount.to_minor_units(),
            callback_url: self.config.callback_url.clone(),
        };

        let response = self
            .http_client
            .post(&url)
            .bearer_auth(self.config.secret_key.expose_secret())
            .json(&body)
            .send()
            .await
            .map_err(Self::transport_error)?;

        let envelope: PaystackEnvelope<PaystackInitializeData> =
            Self::read_envelope(response, "initialize").await?;

        Ok(InitializeTransactionResponse {
            status: envelope.status,
            message: envelope.message,
            data: envelope.data.map(Into::into),
        })
    }

    async fn verify_transaction(
        &self,
        reference: &str,
    ) -> Result<VerifyTransactionResponse, GatewayError> {
        let url = format!("{}/transaction/verify/{}", self.config.api_base_url, reference);

        let response = self
            .http_client
            .get(&url)
            .bearer_auth(self.config.secret_key.expose_secret())
            .send()
            .await
            .map_err(Self::transport_error)?;

        let envelope: PaystackEnvelope<PaystackVerifyData> =
            Self::read_envelope(response, "verify").await?;

        Ok(VerifyTransactionResponse {
            status: envelope.status,
            message: envelope.message,
            data: envelope
                .data
                .map(VerifyTransactionData::try_from)
                .transpose()?,
        })
    }

    fn verify_webhook_signature(&self, payload: &[u8], signature: &str) -> bool {
        let signature = signature.trim();
        if signature.is_empty() {
            return false;
        }

        let expected = self.sign(payload);
        let provided = signature.to_ascii_lowercase();

        let valid = expected.as_bytes().ct_eq(provided.as_bytes()).unwrap_u8() == 1;
        if !valid {
            tracing::warn!("Invalid Paystack webhook signature");
        }
        valid
    }

    fn parse_webhook_event(&self, payload: &[u8]) -> Result<WebhookEvent, GatewayError> {
        let webhook: PaystackWebhook = serde_json::from_slice(payload).map_err(|e| {
            tracing::warn!(error = %e, "Failed to parse webhook payload");
            GatewayError::invalid_webhook(format!("Invalid JSON: {}", e))
        })?;

        Ok(webhook.into())
    }
}
