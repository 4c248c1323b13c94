//! Application handlers.
//!
//! Command and query handlers that orchestrate domain operations over ports.

pub mod movie;
pub mod payment;
pub mod user;
