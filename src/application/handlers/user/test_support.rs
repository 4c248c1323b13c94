//! Test doubles shared by the user handler tests.

use std::sync::Arc;

use crate::adapters::auth::{JwtConfig, JwtTokenService};
use crate::adapters::memory::InMemoryUserRepository;
use crate::domain::foundation::DomainError;
use crate::domain::user::UserAccount;
use crate::ports::{PasswordHasher, UserRepository};

/// Reversible "hash" so tests don't pay for Argon2.
pub struct PlainHasher;

impl PasswordHasher for PlainHasher {
    fn hash(&self, password: &str) -> Result<String, DomainError> {
        Ok(format!("plain:{}", password))
    }

    fn verify(&self, password: &str, hash: &str) -> bool {
        hash.strip_prefix("plain:") == Some(password)
    }
}

pub fn token_service() -> Arc<JwtTokenService> {
    Arc::new(JwtTokenService::new(JwtConfig::new(
        "user-handler-test-secret-value",
        "movie-catalog",
        "movie-catalog-clients",
    )))
}

/// Repository holding one account with password `password1`.
pub async fn repo_with_user() -> (InMemoryUserRepository, UserAccount) {
    let repo = InMemoryUserRepository::new();
    let user = UserAccount::register(
        "ada@example.com",
        "Ada",
        "Lovelace",
        Some("female".to_string()),
        "plain:password1",
    )
    .unwrap();
    repo.create(&user).await.unwrap();
    (repo, user)
}
