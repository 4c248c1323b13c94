//! Paystack payment gateway adapter.
//!
//! - `gateway` - `PaymentGateway` over the Paystack REST API
//! - `wire_types` - JSON shapes and kobo conversion

mod gateway;
mod wire_types;

pub use gateway::{compute_signature, PaystackConfig, PaystackGateway, DEFAULT_BASE_URL, SIGNATURE_HEADER};
