//! Premium entitlement stored on the user record.

use async_trait::async_trait;
use std::sync::Arc;

use crate::domain::foundation::{DomainError, Timestamp, UserId};
use crate::ports::{EntitlementService, UserRepository};

/// Reads and writes the premium window through the user repository.
pub struct UserEntitlementService {
    users: Arc<dyn UserRepository>,
}

impl UserEntitlementService {
    pub fn new(users: Arc<dyn UserRepository>) -> Self {
        Self { users }
    }
}

#[async_trait]
impl EntitlementService for UserEntitlementService {
    async fn is_premium(&self, user_id: &UserId) -> Result<bool, DomainError> {
        let now = Timestamp::now();
        Ok(self
            .users
            .find_by_id(user_id)
            .await?
            .map(|user| user.has_premium_access(&now))
            .unwrap_or(false))
    }

    async fn grant_premium(&self, user_id: &UserId, duration_days: i64) -> Result<(), DomainError> {
        let expires_at = Timestamp::now().add_days(duration_days);
        self.users.set_premium_until(user_id, expires_at).await?;
        tracing::info!(
            user_id = %user_id,
            premium_expires_at = %expires_at.as_datetime(),
            "Premium access granted"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::InMemoryUserRepository;
    use crate::domain::foundation::ErrorCode;
    use crate::domain::user::UserAccount;

    async fn setup() -> (UserEntitlementService, InMemoryUserRepository, UserId) {
        let repo = InMemoryUserRepository::new();
        let user = UserAccount::register("ada@example.com", "Ada", "Lovelace", None, "hash").unwrap();
        let id = user.id;
        repo.create(&user).await.unwrap();
        (UserEntitlementService::new(Arc::new(repo.clone())), repo, id)
    }

    #[tokio::test]
    async fn new_user_is_not_premium() {
        let (service, _, id) = setup().await;
        assert!(!service.is_premium(&id).await.unwrap());
    }

    #[tokio::test]
    async fn grant_opens_window() {
        let (service, repo, id) = setup().await;

        service.grant_premium(&id, 30).await.unwrap();

        assert!(service.is_premium(&id).await.unwrap());
        let stored = repo.find_by_id(&id).await.unwrap().unwrap();
        let expiry = stored.premium_expires_at.unwrap();
        assert!(expiry.is_after(&Timestamp::now().add_days(29)));
        assert!(expiry.is_before(&Timestamp::now().add_days(31)));
    }

    #[tokio::test]
    async fn grant_for_unknown_user_fails() {
        let (service, _, _) = setup().await;
        let err = service.grant_premium(&UserId::new(), 30).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::UserNotFound);
    }

    #[tokio::test]
    async fn unknown_user_is_not_premium() {
        let (service, _, _) = setup().await;
        assert!(!service.is_premium(&UserId::new()).await.unwrap());
    }
}
