//! HTTP adapter for payment endpoints.
//!
//! - `POST /api/v1/payments/initialize` - Start a hosted checkout
//! - `GET /api/v1/payments/verify/:reference` - Confirm a payment with the gateway
//! - `POST /api/v1/payments/webhook` - Gateway push notifications (signature checked)
//! - `GET /api/v1/payments/my-transactions` - Caller's payment history

pub mod dto;
pub mod handlers;
pub mod routes;

pub use routes::payment_routes;
