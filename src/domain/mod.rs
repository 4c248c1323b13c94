//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (value objects, IDs, errors)
//! - `payment` - Payment attempts and their status lifecycle
//! - `movie` - Catalog entries and premium gating
//! - `user` - Accounts, credentials and premium entitlement

pub mod foundation;
pub mod movie;
pub mod payment;
pub mod user;
