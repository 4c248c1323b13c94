//! RefreshTokenHandler - new access token from a refresh token.

use std::sync::Arc;

use super::login_user::token_error;
use super::{RefreshTokenResult, UserView};
use crate::domain::foundation::{DomainError, ErrorCode, Timestamp};
use crate::ports::{TokenIssuer, UserRepository};

#[derive(Debug, Clone)]
pub struct RefreshTokenCommand {
    pub refresh_token: String,
}

pub struct RefreshTokenHandler {
    users: Arc<dyn UserRepository>,
    tokens: Arc<dyn TokenIssuer>,
}

impl RefreshTokenHandler {
    pub fn new(users: Arc<dyn UserRepository>, tokens: Arc<dyn TokenIssuer>) -> Self {
        Self { users, tokens }
    }

    /// The refresh token itself is not rotated.
    pub async fn handle(&self, cmd: RefreshTokenCommand) -> Result<RefreshTokenResult, DomainError> {
        let invalid = || DomainError::new(ErrorCode::Unauthorized, "Invalid or expired refresh token");

        let user = self
            .users
            .find_by_refresh_token(&cmd.refresh_token)
            .await?
            .ok_or_else(invalid)?;
        if !user.refresh_token_is_valid(&cmd.refresh_token, &Timestamp::now()) {
            return Err(invalid());
        }

        let access = self.tokens.issue_access_token(&user).map_err(token_error)?;
        Ok(RefreshTokenResult {
            user: UserView::from(&user),
            access_token: access.token,
            access_token_expires_at: access.expires_at,
        })
    }
}
