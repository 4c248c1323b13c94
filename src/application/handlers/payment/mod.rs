//! Payment handlers.
//!
//! ## Commands
//! - Initializing a hosted checkout
//! - Verifying a payment on the client's request
//! - Processing gateway webhooks
//!
//! ## Queries
//! - Listing the caller's transactions
//!
//! Verification and webhooks share `PaymentSettlement`, which performs the
//! guarded transition to Success and the one-time premium grant.

mod get_user_transactions;
mod handle_payment_webhook;
mod initialize_payment;
mod settlement;
mod verify_payment;

#[cfg(test)]
pub(crate) mod test_support;

// Commands
pub use handle_payment_webhook::{HandlePaymentWebhookCommand, HandlePaymentWebhookHandler};
pub use initialize_payment::{InitializePaymentCommand, InitializePaymentHandler};
pub use verify_payment::{VerifyPaymentCommand, VerifyPaymentHandler, VerifyPaymentResult};

// Queries
pub use get_user_transactions::{GetUserTransactionsHandler, GetUserTransactionsQuery, PaymentView};

pub use settlement::{PaymentSettlement, SettlementOutcome};
