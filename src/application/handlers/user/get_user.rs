//! GetUserHandler - account lookup by id, also used for the current user.

use std::sync::Arc;

use super::UserView;
use crate::domain::foundation::{DomainError, ErrorCode, UserId};
use crate::ports::UserRepository;

#[derive(Debug, Clone)]
pub struct GetUserQuery {
    pub user_id: UserId,
}

pub struct GetUserHandler {
    users: Arc<dyn UserRepository>,
}

impl GetUserHandler {
    pub fn new(users: Arc<dyn UserRepository>) -> Self {
        Self { users }
    }

    pub async fn handle(&self, query: GetUserQuery) -> Result<UserView, DomainError> {
        self.users
            .find_by_id(&query.user_id)
            .await?
            .map(|user| UserView::from(&user))
            .ok_or_else(|| {
                DomainError::new(
                    ErrorCode::UserNotFound,
                    format!("User {} not found", query.user_id),
                )
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::handlers::user::test_support::repo_with_user;

    #[tokio::test]
    async fn returns_existing_user() {
        let (repo, user) = repo_with_user().await;
        let handler = GetUserHandler::new(Arc::new(repo));

        let view = handler.handle(GetUserQuery { user_id: user.id }).await.unwrap();
        assert_eq!(view.email, "ada@example.com");
        assert_eq!(view.gender.as_deref(), Some("female"));
    }

    #[tokio::test]
    async fn unknown_user_is_not_found() {
        let (repo, _) = repo_with_user().await;
        let handler = GetUserHandler::new(Arc::new(repo));

        let err = handler
            .handle(GetUserQuery { user_id: UserId::new() })
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::UserNotFound);
    }
}
