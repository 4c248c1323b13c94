//! RevokeTokenHandler - invalidates a refresh token.

use std::sync::Arc;

use crate::domain::foundation::DomainError;
use crate::ports::UserRepository;

#[derive(Debug, Clone)]
pub struct RevokeTokenCommand {
    pub refresh_token: String,
}

pub struct RevokeTokenHandler {
    users: Arc<dyn UserRepository>,
}

impl RevokeTokenHandler {
    pub fn new(users: Arc<dyn UserRepository>) -> Self {
        Self { users }
    }

    /// An unknown token is a validation failure, not an authorization one.
    pub async fn handle(&self, cmd: RevokeTokenCommand) -> Result<(), DomainError> {
        let mut user = self
            .users
            .find_by_refresh_token(&cmd.refresh_token)
            .await?
            .ok_or_else(|| DomainError::validation("refresh_token", "Invalid refresh token"))?;

        user.clear_refresh_token();
        self.users.update(&user).await?;
        tracing::info!(user_id = %user.id, "Refresh token revoked");
        Ok(())
    }
}
