//! Payment domain module.
//!
//! # Module Structure
//!
//! - `aggregate` - Payment entity with its concurrency token
//! - `status` - PaymentStatus state machine
//! - `gateway` - Gateway request/response value types

mod aggregate;
mod gateway;
mod status;

pub use aggregate::{Payment, INITIAL_VERSION};
pub use gateway::{
    InitializeTransactionData, InitializeTransactionResponse, VerifyTransactionData,
    VerifyTransactionResponse, WebhookEvent, WebhookEventData, CHARGE_SUCCESS_EVENT,
    GATEWAY_FAILED, GATEWAY_SUCCESS, GATEWAY_UNAVAILABLE_MESSAGE,
};
pub use status::PaymentStatus;
