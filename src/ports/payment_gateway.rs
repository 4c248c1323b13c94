//! Payment gateway port for the external card processor.
//!
//! The gateway starts hosted-checkout transactions, answers authoritative
//! verification queries, and signs the webhooks it pushes back. Adapters
//! convert amounts to and from the gateway's minor units; callers only see
//! `Amount`.
//!
//! Resilience (timeout, retry, circuit breaking, fallback) is layered on by
//! wrapping one `PaymentGateway` in another, see `adapters::resilience`.

use crate::domain::foundation::{Amount, DomainError, ErrorCode};
use crate::domain::payment::{
    InitializeTransactionResponse, VerifyTransactionResponse, WebhookEvent,
};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Port for the payment gateway.
#[async_trait]
pub trait PaymentGateway: Send + Sync {
    /// Start a transaction for `email` charging `amount`.
    ///
    /// A `status: false` response is a gateway-level refusal, not an error.
    /// `Err` is reserved for transport and protocol failures.
    async fn initialize_transaction(
        &self,
        request: InitializeTransactionRequest,
    ) -> Result<InitializeTransactionResponse, GatewayError>;

    /// Ask the gateway for the authoritative state of `reference`.
    async fn verify_transaction(
        &self,
        reference: &str,
    ) -> Result<VerifyTransactionResponse, GatewayError>;

    /// Check the signature the gateway attached to a webhook body.
    ///
    /// Must compare in constant time.
    fn verify_webhook_signature(&self, payload: &[u8], signature: &str) -> bool;

    /// Decode a webhook body whose signature has already been checked.
    fn parse_webhook_event(&self, payload: &[u8]) -> Result<WebhookEvent, GatewayError>;
}

/// Request to start a gateway transaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InitializeTransactionRequest {
    pub email: String,
    pub amount: Amount,
}

/// Errors from gateway calls.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GatewayError {
    /// Error code for categorization.
    pub code: GatewayErrorCode,

    /// Human-readable message.
    pub message: String,

    /// HTTP status the gateway answered with, when there was one.
    pub http_status: Option<u16>,
}

impl GatewayError {
    /// Create a new gateway error.
    pub fn new(code: GatewayErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            http_status: None,
        }
    }

    /// Attach the HTTP status code.
    pub fn with_http_status(mut self, status: u16) -> Self {
        self.http_status = Some(status);
        self
    }

    /// Create a network error.
    pub fn network(message: impl Into<String>) -> Self {
        Self::new(GatewayErrorCode::NetworkError, message)
    }

    /// Create a timeout error.
    pub fn timeout(message: impl Into<String>) -> Self {
        Self::new(GatewayErrorCode::Timeout, message)
    }

    /// Create a server-side (5xx) error.
    pub fn server(status: u16, message: impl Into<String>) -> Self {
        Self::new(GatewayErrorCode::ServerError, message).with_http_status(status)
    }

    /// Create a circuit-open error.
    pub fn circuit_open() -> Self {
        Self::new(
            GatewayErrorCode::CircuitOpen,
            "Payment gateway circuit is open",
        )
    }

    /// Create an invalid response error.
    pub fn invalid_response(message: impl Into<String>) -> Self {
        Self::new(GatewayErrorCode::InvalidResponse, message)
    }

    /// Create an invalid webhook error.
    pub fn invalid_webhook(message: impl Into<String>) -> Self {
        Self::new(GatewayErrorCode::InvalidWebhook, message)
    }

    /// Failures worth retrying and counting against the circuit.
    pub fn is_transient(&self) -> bool {
        self.code.is_transient()
    }

    /// Failures the fallback layer converts into a degraded response.
    pub fn is_unavailable(&self) -> bool {
        self.is_transient() || self.code == GatewayErrorCode::CircuitOpen
    }
}

impl std::fmt::Display for GatewayError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.code, self.message)
    }
}

impl std::error::Error for GatewayError {}

impl From<GatewayError> for DomainError {
    fn from(err: GatewayError) -> Self {
        let code = match err.code {
            GatewayErrorCode::InvalidWebhook => ErrorCode::BadRequest,
            _ if err.is_unavailable() => ErrorCode::GatewayUnavailable,
            _ => ErrorCode::GatewayError,
        };

        DomainError::new(code, err.message)
    }
}

/// Gateway error codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GatewayErrorCode {
    /// Connection could not be established or was reset.
    NetworkError,

    /// No answer within the per-attempt deadline.
    Timeout,

    /// Gateway answered 5xx.
    ServerError,

    /// Gateway answered 429.
    RateLimited,

    /// Calls are short-circuited while the breaker is open.
    CircuitOpen,

    /// Secret key rejected.
    AuthenticationError,

    /// Body could not be decoded.
    InvalidResponse,

    /// Webhook body could not be decoded.
    InvalidWebhook,
}

impl GatewayErrorCode {
    /// Check if this error type is typically transient.
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            GatewayErrorCode::NetworkError
                | GatewayErrorCode::Timeout
                | GatewayErrorCode::ServerError
                | GatewayErrorCode::RateLimited
        )
    }
}

impl std::fmt::Display for GatewayErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            GatewayErrorCode::NetworkError => "network_error",
            GatewayErrorCode::Timeout => "timeout",
            GatewayErrorCode::ServerError => "server_error",
            GatewayErrorCode::RateLimited => "rate_limited",
            GatewayErrorCode::CircuitOpen => "circuit_open",
            GatewayErrorCode::AuthenticationError => "authentication_error",
            GatewayErrorCode::InvalidResponse => "invalid_response",
            GatewayErrorCode::InvalidWebhook => "invalid_webhook",
        };
        write!(f, "{}", s)
    }
}
