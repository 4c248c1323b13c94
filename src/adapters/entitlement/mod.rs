//! Entitlement adapters.

mod user_entitlement;

pub use user_entitlement::UserEntitlementService;
