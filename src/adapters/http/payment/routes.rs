//! Axum router for payment endpoints.

use axum::routing::{get, post};
use axum::Router;

use super::handlers::{initialize_payment, my_transactions, payment_webhook, verify_payment};
use crate::adapters::http::state::AppState;

/// Payment routes, mounted at `/api/v1/payments`.
///
/// All but the webhook require a bearer token; the webhook is verified by
/// its signature instead.
pub fn payment_routes() -> Router<AppState> {
    Router::new()
        .route("/initialize", post(initialize_payment))
        .route("/verify/:reference", get(verify_payment))
        .route("/webhook", post(payment_webhook))
        .route("/my-transactions", get(my_transactions))
}
