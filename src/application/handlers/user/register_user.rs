//! RegisterUserHandler - creates an account.

use std::sync::Arc;

use super::UserView;
use crate::domain::foundation::{DomainError, ErrorCode};
use crate::domain::user::{normalize_email, validate_password, UserAccount};
use crate::ports::{PasswordHasher, UserRepository};

#[derive(Debug, Clone)]
pub struct RegisterUserCommand {
    pub email: String,
    pub password: String,
    pub first_name: String,
    pub last_name: String,
    pub gender: Option<String>,
}

pub struct RegisterUserHandler {
    users: Arc<dyn UserRepository>,
    hasher: Arc<dyn PasswordHasher>,
}

impl RegisterUserHandler {
    pub fn new(users: Arc<dyn UserRepository>, hasher: Arc<dyn PasswordHasher>) -> Self {
        Self { users, hasher }
    }

    pub async fn handle(&self, cmd: RegisterUserCommand) -> Result<UserView, DomainError> {
        let email = normalize_email(&cmd.email)?;
        validate_password(&cmd.password)?;

        if self.users.find_by_email(&email).await?.is_some() {
            return Err(DomainError::new(
                ErrorCode::Conflict,
                format!("Email {} is already registered", email),
            ));
        }

        let password_hash = self.hasher.hash(&cmd.password)?;
        let user = UserAccount::register(
            &email,
            cmd.first_name,
            cmd.last_name,
            cmd.gender,
            password_hash,
        )?;
        self.users.create(&user).await?;

        tracing::info!(user_id = %user.id, "User registered");
        Ok(UserView::from(&user))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::InMemoryUserRepository;
    use crate::application::handlers::user::test_support::PlainHasher;

    fn cmd(email: &str, password: &str) -> RegisterUserCommand {
        RegisterUserCommand {
            email: email.to_string(),
            password: password.to_string(),
            first_name: "Ada".to_string(),
            last_name: "Lovelace".to_string(),
            gender: None,
        }
    }

    fn handler(repo: &InMemoryUserRepository) -> RegisterUserHandler {
        RegisterUserHandler::new(Arc::new(repo.clone()), Arc::new(PlainHasher))
    }

    #[tokio::test]
    async fn registers_with_hashed_password() {
        let repo = InMemoryUserRepository::new();

        let view = handler(&repo).handle(cmd("Ada@Example.com", "password1")).await.unwrap();

        assert_eq!(view.email, "ada@example.com");
        assert!(!view.is_premium);
        let stored = repo.find_by_id(&view.id).await.unwrap().unwrap();
        assert_eq!(stored.password_hash, "plain:password1");
    }

    #[tokio::test]
    async fn duplicate_email_conflicts() {
        let repo = InMemoryUserRepository::new();
        handler(&repo).handle(cmd("ada@example.com", "password1")).await.unwrap();

        let err = handler(&repo)
            .handle(cmd("ADA@example.com", "password2"))
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::Conflict);
    }

    #[tokio::test]
    async fn short_password_is_rejected() {
        let repo = InMemoryUserRepository::new();
        let err = handler(&repo).handle(cmd("ada@example.com", "short")).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationFailed);
    }

    #[tokio::test]
    async fn malformed_email_is_rejected() {
        let repo = InMemoryUserRepository::new();
        let err = handler(&repo).handle(cmd("not-an-email", "password1")).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationFailed);
    }
}
