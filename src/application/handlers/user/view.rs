//! User read models.

use serde::Serialize;

use crate::domain::foundation::{Timestamp, UserId};
use crate::domain::user::UserAccount;

/// Public account fields. Never carries credentials.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserView {
    pub id: UserId,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub gender: Option<String>,

    /// Premium window open right now.
    pub is_premium: bool,
    pub premium_expires_at: Option<Timestamp>,

    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl From<&UserAccount> for UserView {
    fn from(user: &UserAccount) -> Self {
        Self {
            id: user.id,
            email: user.email.clone(),
            first_name: user.first_name.clone(),
            last_name: user.last_name.clone(),
            gender: user.gender.clone(),
            is_premium: user.has_premium_access(&Timestamp::now()),
            premium_expires_at: user.premium_expires_at,
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

/// Tokens handed out at login.
#[derive(Debug, Clone, Serialize)]
pub struct LoginResult {
    pub user: UserView,
    pub access_token: String,
    pub access_token_expires_at: Timestamp,
    pub refresh_token: String,
    pub refresh_token_expires_at: Timestamp,
}

/// New access token for a still-valid refresh token.
#[derive(Debug, Clone, Serialize)]
pub struct RefreshTokenResult {
    pub user: UserView,
    pub access_token: String,
    pub access_token_expires_at: Timestamp,
}
