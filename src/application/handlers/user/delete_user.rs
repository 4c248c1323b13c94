//! DeleteUserHandler - removes an account. Deleting twice is fine.

use std::sync::Arc;

use crate::domain::foundation::{DomainError, UserId};
use crate::ports::UserRepository;

#[derive(Debug, Clone)]
pub struct DeleteUserCommand {
    pub user_id: UserId,
}

pub struct DeleteUserHandler {
    users: Arc<dyn UserRepository>,
}

impl DeleteUserHandler {
    pub fn new(users: Arc<dyn UserRepository>) -> Self {
        Self { users }
    }

    pub async fn handle(&self, cmd: DeleteUserCommand) -> Result<(), DomainError> {
        self.users.delete(&cmd.user_id).await?;
        tracing::info!(user_id = %cmd.user_id, "User deleted");
        Ok(())
    }
}
