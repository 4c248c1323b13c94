//! LoginUserHandler - exchanges credentials for tokens.

use std::sync::Arc;

use super::{LoginResult, UserView};
use crate::domain::foundation::{AuthError, DomainError, ErrorCode};
use crate::ports::{PasswordHasher, TokenIssuer, UserRepository};

#[derive(Debug, Clone)]
pub struct LoginUserCommand {
    pub email: String,
    pub password: String,
}

pub struct LoginUserHandler {
    users: Arc<dyn UserRepository>,
    hasher: Arc<dyn PasswordHasher>,
    tokens: Arc<dyn TokenIssuer>,
}

fn invalid_credentials() -> DomainError {
    DomainError::new(ErrorCode::Unauthorized, "Invalid email or password")
}

pub(super) fn token_error(err: AuthError) -> DomainError {
    DomainError::new(ErrorCode::InternalError, err.to_string())
}

impl LoginUserHandler {
    pub fn new(
        users: Arc<dyn UserRepository>,
        hasher: Arc<dyn PasswordHasher>,
        tokens: Arc<dyn TokenIssuer>,
    ) -> Self {
        Self { users, hasher, tokens }
    }

    /// Unknown email and wrong password fail identically.
    pub async fn handle(&self, cmd: LoginUserCommand) -> Result<LoginResult, DomainError> {
        let email = cmd.email.trim().to_lowercase();
        let mut user = self
            .users
            .find_by_email(&email)
            .await?
            .ok_or_else(invalid_credentials)?;

        if !self.hasher.verify(&cmd.password, &user.password_hash) {
            tracing::info!(user_id = %user.id, "Login rejected");
            return Err(invalid_credentials());
        }

        let access = self.tokens.issue_access_token(&user).map_err(token_error)?;
        let refresh = self.tokens.issue_refresh_token();
        user.set_refresh_token(refresh.token.clone(), refresh.expires_at);
        self.users.update(&user).await?;

        tracing::info!(user_id = %user.id, "User logged in");
        Ok(LoginResult {
            user: UserView::from(&user),
            access_token: access.token,
            access_token_expires_at: access.expires_at,
            refresh_token: refresh.token,
            refresh_token_expires_at: refresh.expires_at,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::handlers::user::test_support::{
        repo_with_user, token_service, PlainHasher,
    };
    use crate::ports::SessionValidator;

    #[tokio::test]
    async fn valid_credentials_issue_tokens() {
        let (repo, user) = repo_with_user().await;
        let tokens = token_service();
        let handler = LoginUserHandler::new(Arc::new(repo.clone()), Arc::new(PlainHasher), tokens.clone());

        let result = handler
            .handle(LoginUserCommand {
                email: "ADA@example.com".to_string(),
                password: "password1".to_string(),
            })
            .await
            .unwrap();

        let authenticated = tokens.validate(&result.access_token).await.unwrap();
        assert_eq!(authenticated.id, user.id);

        let stored = repo.find_by_id(&user.id).await.unwrap().unwrap();
        assert_eq!(stored.refresh_token.as_deref(), Some(result.refresh_token.as_str()));
    }

    #[tokio::test]
    async fn wrong_password_is_unauthorized() {
        let (repo, _) = repo_with_user().await;
        let handler = LoginUserHandler::new(Arc::new(repo), Arc::new(PlainHasher), token_service());

        let err = handler
            .handle(LoginUserCommand {
                email: "ada@example.com".to_string(),
                password: "password2".to_string(),
            })
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::Unauthorized);
    }

    #[tokio::test]
    async fn unknown_email_is_unauthorized() {
        let (repo, _) = repo_with_user().await;
        let handler = LoginUserHandler::new(Arc::new(repo), Arc::new(PlainHasher), token_service());

        let err = handler
            .handle(LoginUserCommand {
                email: "nobody@example.com".to_string(),
                password: "password1".to_string(),
            })
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::Unauthorized);
    }
}
