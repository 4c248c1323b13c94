//! User account handlers.
//!
//! ## Commands
//! - Registering, updating and deleting accounts
//! - Logging in, refreshing and revoking tokens
//!
//! ## Queries
//! - Get an account (also serves the current user)

mod delete_user;
mod get_user;
mod login_user;
mod refresh_token;
mod register_user;
mod revoke_token;
mod update_user;
mod view;

#[cfg(test)]
pub(crate) mod test_support;

// Commands
pub use delete_user::{DeleteUserCommand, DeleteUserHandler};
pub use login_user::{LoginUserCommand, LoginUserHandler};
pub use refresh_token::{RefreshTokenCommand, RefreshTokenHandler};
pub use register_user::{RegisterUserCommand, RegisterUserHandler};
pub use revoke_token::{RevokeTokenCommand, RevokeTokenHandler};
pub use update_user::{UpdateUserCommand, UpdateUserHandler};

// Queries
pub use get_user::{GetUserHandler, GetUserQuery};

pub use view::{LoginResult, RefreshTokenResult, UserView};
