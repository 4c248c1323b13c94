//! HTTP handlers for payment endpoints.

use axum::body::Bytes;
use axum::extract::{Json, Path, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::IntoResponse;

use crate::adapters::http::error::ApiError;
use crate::adapters::http::middleware::RequireAuth;
use crate::adapters::http::state::AppState;
use crate::adapters::paystack::SIGNATURE_HEADER;
use crate::application::handlers::payment::{
    GetUserTransactionsQuery, HandlePaymentWebhookCommand, InitializePaymentCommand,
    VerifyPaymentCommand,
};
use crate::domain::foundation::{Amount, DomainError, ErrorCode};

use super::dto::{InitializePaymentRequest, WebhookAck};

/// 200 when the gateway accepted, 400 otherwise; the body is the gateway's answer either way.
fn gateway_status(accepted: bool) -> StatusCode {
    if accepted {
        StatusCode::OK
    } else {
        StatusCode::BAD_REQUEST
    }
}

/// POST /api/v1/payments/initialize
pub async fn initialize_payment(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Json(request): Json<InitializePaymentRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let amount = Amount::new(request.amount)?;
    let email = request
        .email
        .filter(|e| !e.trim().is_empty())
        .unwrap_or_else(|| user.email.clone());

    let cmd = InitializePaymentCommand {
        user_id: user.id,
        email,
        amount,
    };
    let response = state.initialize_payment_handler().handle(cmd).await?;

    Ok((gateway_status(response.status), Json(response)))
}

/// GET /api/v1/payments/verify/:reference
pub async fn verify_payment(
    State(state): State<AppState>,
    RequireAuth(_user): RequireAuth,
    Path(reference): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let result = state
        .verify_payment_handler()
        .handle(VerifyPaymentCommand { reference })
        .await?;

    Ok((gateway_status(result.response.status), Json(result.response)))
}

/// POST /api/v1/payments/webhook
///
/// Anonymous; authenticity comes from the signature over the raw body, so
/// the body is read as bytes and only decoded after the check.
pub async fn payment_webhook(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<impl IntoResponse, ApiError> {
    let signature = headers
        .get(SIGNATURE_HEADER)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default();

    if !state.payment_gateway.verify_webhook_signature(&body, signature) {
        return Err(DomainError::new(ErrorCode::Unauthorized, "Invalid webhook signature.").into());
    }

    let event = state.payment_gateway.parse_webhook_event(&body).map_err(DomainError::from)?;
    let handled = state
        .payment_webhook_handler()
        .handle(HandlePaymentWebhookCommand { event })
        .await?;

    Ok(Json(WebhookAck { handled }))
}

/// GET /api/v1/payments/my-transactions
pub async fn my_transactions(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
) -> Result<impl IntoResponse, ApiError> {
    let transactions = state
        .user_transactions_handler()
        .handle(GetUserTransactionsQuery { user_id: user.id })
        .await?;

    Ok(Json(transactions))
}
