//! UpdateUserHandler - partial profile update.

use std::sync::Arc;

use super::UserView;
use crate::domain::foundation::{DomainError, ErrorCode, Timestamp, UserId};
use crate::domain::user::normalize_email;
use crate::ports::UserRepository;

/// Fields left as `None` keep their current value.
#[derive(Debug, Clone, Default)]
pub struct UpdateUserCommand {
    pub user_id: UserId,
    pub email: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub gender: Option<String>,
}

pub struct UpdateUserHandler {
    users: Arc<dyn UserRepository>,
}

impl UpdateUserHandler {
    pub fn new(users: Arc<dyn UserRepository>) -> Self {
        Self { users }
    }

    pub async fn handle(&self, cmd: UpdateUserCommand) -> Result<UserView, DomainError> {
        let mut user = self
            .users
            .find_by_id(&cmd.user_id)
            .await?
            .ok_or_else(|| {
                DomainError::new(
                    ErrorCode::UserNotFound,
                    format!("User {} not found", cmd.user_id),
                )
            })?;

        if let Some(email) = cmd.email {
            user.email = normalize_email(&email)?;
        }
        if let Some(first_name) = cmd.first_name {
            user.first_name = first_name.trim().to_string();
        }
        if let Some(last_name) = cmd.last_name {
            user.last_name = last_name.trim().to_string();
        }
        if let Some(gender) = cmd.gender {
            user.gender = Some(gender);
        }
        user.updated_at = Timestamp::now();

        self.users.update(&user).await?;
        tracing::info!(user_id = %user.id, "User updated");
        Ok(UserView::from(&user))
    }
}
