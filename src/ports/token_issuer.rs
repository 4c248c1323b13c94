//! Token issuing port.
//!
//! Produces the signed access token returned at login/refresh, and the
//! opaque refresh token stored on the account.

use crate::domain::foundation::{AuthError, Timestamp};
use crate::domain::user::UserAccount;

/// Signed access token and its expiry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssuedToken {
    pub token: String,
    pub expires_at: Timestamp,
}

/// Port for issuing tokens.
pub trait TokenIssuer: Send + Sync {
    /// Sign an access token carrying the user's identity claims.
    fn issue_access_token(&self, user: &UserAccount) -> Result<IssuedToken, AuthError>;

    /// Generate a fresh opaque refresh token and its expiry.
    fn issue_refresh_token(&self) -> IssuedToken;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn token_issuer_is_object_safe() {
        fn _accepts_dyn(_issuer: &dyn TokenIssuer) {}
    }
}
