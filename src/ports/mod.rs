//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! ## Persistence Ports
//!
//! - `PaymentRepository` - Payment attempts with compare-and-set status changes
//! - `MovieRepository` - Catalog entries
//! - `UserRepository` - Accounts, refresh tokens and premium window
//!
//! ## Payment Ports
//!
//! - `PaymentGateway` - External card processor
//! - `EntitlementService` - Premium access granted by settled payments
//! - `CircuitBreaker` - Resilience state shared by gateway calls
//!
//! ## Identity Ports
//!
//! - `SessionValidator` - Bearer token validation
//! - `TokenIssuer` - Access and refresh token issuing
//! - `PasswordHasher` - Credential hashing

mod circuit_breaker;
mod entitlement_service;
mod movie_repository;
mod password_hasher;
mod payment_gateway;
mod payment_repository;
mod session_validator;
mod token_issuer;
mod user_repository;

pub use circuit_breaker::{CircuitBreaker, CircuitBreakerConfig, CircuitBreakerMetrics, CircuitState};
pub use entitlement_service::EntitlementService;
pub use movie_repository::MovieRepository;
pub use password_hasher::PasswordHasher;
pub use payment_gateway::{
    GatewayError, GatewayErrorCode, InitializeTransactionRequest, PaymentGateway,
};
pub use payment_repository::PaymentRepository;
pub use session_validator::SessionValidator;
pub use token_issuer::{IssuedToken, TokenIssuer};
pub use user_repository::UserRepository;
