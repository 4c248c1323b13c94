//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the domain to external systems:
//! - `auth` - JWT issuing/validation and Argon2 password hashing
//! - `entitlement` - Premium access over the user store
//! - `http` - axum REST API
//! - `memory` - In-memory repositories (tests, local development)
//! - `paystack` - Paystack payment gateway
//! - `postgres` - PostgreSQL repositories
//! - `resilience` - Timeout, retry, circuit breaker and fallback around the gateway

pub mod auth;
pub mod entitlement;
pub mod http;
pub mod memory;
pub mod paystack;
pub mod postgres;
pub mod resilience;
