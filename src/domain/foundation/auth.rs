//! Authentication types for the domain layer.
//!
//! `AuthenticatedUser` is what the `SessionValidator` port produces from a
//! bearer token. It carries no token-format specifics, so handlers stay
//! unaware of how the token was signed.

use super::UserId;
use thiserror::Error;

/// Role granted to every registered account.
pub const ROLE_USER: &str = "User";

/// Authenticated user extracted from a validated access token.
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    /// Account identifier (the token subject).
    pub id: UserId,

    /// Email address from the token claims.
    pub email: String,

    /// Display name built from first and last name, when present.
    pub display_name: Option<String>,

    /// Roles carried by the token.
    pub roles: Vec<String>,
}

impl AuthenticatedUser {
    /// Creates a new authenticated user with the default role.
    pub fn new(id: UserId, email: impl Into<String>, display_name: Option<String>) -> Self {
        Self {
            id,
            email: email.into(),
            display_name,
            roles: vec![ROLE_USER.to_string()],
        }
    }

    /// Replaces the role list.
    pub fn with_roles(mut self, roles: Vec<String>) -> Self {
        self.roles = roles;
        self
    }

    /// Returns the user's display name, or email as fallback.
    pub fn display_name_or_email(&self) -> &str {
        self.display_name.as_deref().unwrap_or(&self.email)
    }

    pub fn has_role(&self, role: &str) -> bool {
        self.roles.iter().any(|r| r == role)
    }
}

/// Authentication errors that can occur during token validation.
#[derive(Debug, Clone, Error)]
pub enum AuthError {
    /// The token is missing, malformed, or has an invalid signature.
    #[error("Invalid or expired token")]
    InvalidToken,

    /// The token has expired.
    #[error("Token expired")]
    TokenExpired,

    /// Token is valid but the user no longer exists in the system.
    #[error("User not found")]
    UserNotFound,

    /// Token issuing or validation could not run (bad key, encoding failure).
    #[error("Auth service unavailable: {0}")]
    ServiceUnavailable(String),
}

impl AuthError {
    /// Creates a service unavailable error with a message.
    pub fn service_unavailable(message: impl Into<String>) -> Self {
        Self::ServiceUnavailable(message.into())
    }

    /// Returns true if this error indicates the user should re-authenticate.
    pub fn requires_reauthentication(&self) -> bool {
        matches!(
            self,
            AuthError::InvalidToken | AuthError::TokenExpired | AuthError::UserNotFound
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_user_has_default_role() {
        let user = AuthenticatedUser::new(UserId::new(), "test@example.com", None);
        assert!(user.has_role(ROLE_USER));
        assert!(!user.has_role("Admin"));
    }

    #[test]
    fn display_name_falls_back_to_email() {
        let user = AuthenticatedUser::new(UserId::new(), "test@example.com", None);
        assert_eq!(user.display_name_or_email(), "test@example.com");

        let named = AuthenticatedUser::new(
            UserId::new(),
            "test@example.com",
            Some("Ada Obi".to_string()),
        );
        assert_eq!(named.display_name_or_email(), "Ada Obi");
    }

    #[test]
    fn expired_token_requires_reauthentication() {
        assert!(AuthError::TokenExpired.requires_reauthentication());
        assert!(!AuthError::service_unavailable("down").requires_reauthentication());
    }

    #[test]
    fn auth_error_displays_message() {
        assert_eq!(AuthError::InvalidToken.to_string(), "Invalid or expired token");
    }
}
