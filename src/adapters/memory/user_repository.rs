//! In-memory user repository.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::foundation::{DomainError, ErrorCode, Timestamp, UserId};
use crate::domain::user::UserAccount;
use crate::ports::UserRepository;

#[derive(Debug, Clone, Default)]
pub struct InMemoryUserRepository {
    users: Arc<RwLock<HashMap<UserId, UserAccount>>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

fn not_found(id: &UserId) -> DomainError {
    DomainError::new(ErrorCode::UserNotFound, format!("User {} not found", id))
}

fn email_taken(email: &str) -> DomainError {
    DomainError::new(ErrorCode::Conflict, format!("Email {} is already registered", email))
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn create(&self, user: &UserAccount) -> Result<(), DomainError> {
        let mut users = self.users.write().await;
        if users.values().any(|u| u.email == user.email) {
            return Err(email_taken(&user.email));
        }
        users.insert(user.id, user.clone());
        Ok(())
    }

    async fn update(&self, user: &UserAccount) -> Result<(), DomainError> {
        let mut users = self.users.write().await;
        if users
            .values()
            .any(|u| u.email == user.email && u.id != user.id)
        {
            return Err(email_taken(&user.email));
        }
        match users.get_mut(&user.id) {
            Some(stored) => {
                *stored = user.clone();
                Ok(())
            }
            None => Err(not_found(&user.id)),
        }
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<UserAccount>, DomainError> {
        Ok(self.users.read().await.get(id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<UserAccount>, DomainError> {
        Ok(self
            .users
            .read()
            .await
            .values()
            .find(|u| u.email == email)
            .cloned())
    }

    async fn find_by_refresh_token(&self, token: &str) -> Result<Option<UserAccount>, DomainError> {
        Ok(self
            .users
            .read()
            .await
            .values()
            .find(|u| u.refresh_token.as_deref() == Some(token))
            .cloned())
    }

    async fn set_premium_until(&self, id: &UserId, expires_at: Timestamp) -> Result<(), DomainError> {
        let mut users = self.users.write().await;
        let user = users.get_mut(id).ok_or_else(|| not_found(id))?;
        user.is_premium = true;
        user.premium_expires_at = Some(expires_at);
        user.updated_at = Timestamp::now();
        Ok(())
    }

    async fn delete(&self, id: &UserId) -> Result<(), DomainError> {
        self.users.write().await.remove(id);
        Ok(())
    }
}
