//! Foundation module - Shared domain primitives.
//!
//! Contains value objects, identifiers, and error types that form the
//! vocabulary of the movie catalog and payment domain.

mod auth;
mod errors;
mod ids;
mod money;
mod state_machine;
mod timestamp;

pub use auth::{AuthError, AuthenticatedUser, ROLE_USER};
pub use errors::{DomainError, ErrorCode, ValidationError};
pub use ids::{MovieId, PaymentId, PaymentReference, UserId};
pub use money::Amount;
pub use state_machine::StateMachine;
pub use timestamp::Timestamp;
