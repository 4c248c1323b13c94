//! HTTP handlers for account endpoints.

use axum::extract::{Json, Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;

use crate::adapters::http::error::ApiError;
use crate::adapters::http::middleware::RequireAuth;
use crate::adapters::http::state::AppState;
use crate::application::handlers::user::{
    DeleteUserCommand, GetUserQuery, LoginUserCommand, RefreshTokenCommand, RegisterUserCommand,
    RevokeTokenCommand, UpdateUserCommand,
};
use crate::domain::foundation::{AuthenticatedUser, DomainError, ErrorCode, UserId};

use super::dto::{
    LoginRequest, MessageResponse, RefreshTokenRequest, RegisterRequest, UpdateUserRequest,
};

/// Accounts may only be changed by their owner.
fn ensure_owner(caller: &AuthenticatedUser, target: &UserId) -> Result<(), ApiError> {
    if &caller.id == target {
        Ok(())
    } else {
        tracing::warn!(caller = %caller.id, target = %target, "Rejected change to another account");
        Err(DomainError::new(ErrorCode::Forbidden, "You can only modify your own account").into())
    }
}

/// POST /api/user/register
pub async fn register(
    State(state): State<AppState>,
    Json(request): Json<RegisterRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let cmd = RegisterUserCommand {
        email: request.email,
        password: request.password,
        first_name: request.first_name,
        last_name: request.last_name,
        gender: request.gender,
    };
    let user = state.register_user_handler().handle(cmd).await?;
    Ok(Json(user))
}

/// POST /api/user/login
pub async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let cmd = LoginUserCommand {
        email: request.email,
        password: request.password,
    };
    let result = state.login_user_handler().handle(cmd).await?;
    Ok(Json(result))
}

/// GET /api/user/current
pub async fn current_user(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
) -> Result<impl IntoResponse, ApiError> {
    let view = state
        .get_user_handler()
        .handle(GetUserQuery { user_id: user.id })
        .await?;
    Ok(Json(view))
}

/// GET /api/user/:id
pub async fn get_user(
    State(state): State<AppState>,
    RequireAuth(_user): RequireAuth,
    Path(user_id): Path<UserId>,
) -> Result<impl IntoResponse, ApiError> {
    let view = state.get_user_handler().handle(GetUserQuery { user_id }).await?;
    Ok(Json(view))
}

/// PUT /api/user/:id
pub async fn update_user(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Path(user_id): Path<UserId>,
    Json(request): Json<UpdateUserRequest>,
) -> Result<impl IntoResponse, ApiError> {
    ensure_owner(&user, &user_id)?;

    let cmd = UpdateUserCommand {
        user_id,
        email: request.email,
        first_name: request.first_name,
        last_name: request.last_name,
        gender: request.gender,
    };
    let view = state.update_user_handler().handle(cmd).await?;
    Ok(Json(view))
}

/// DELETE /api/user/:id
pub async fn delete_user(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Path(user_id): Path<UserId>,
) -> Result<impl IntoResponse, ApiError> {
    ensure_owner(&user, &user_id)?;

    state
        .delete_user_handler()
        .handle(DeleteUserCommand { user_id })
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/user/refresh-token
pub async fn refresh_token(
    State(state): State<AppState>,
    Json(request): Json<RefreshTokenRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let result = state
        .refresh_token_handler()
        .handle(RefreshTokenCommand {
            refresh_token: request.refresh_token,
        })
        .await?;
    Ok(Json(result))
}

/// POST /api/user/revoke-token
pub async fn revoke_token(
    State(state): State<AppState>,
    RequireAuth(_user): RequireAuth,
    Json(request): Json<RefreshTokenRequest>,
) -> Result<impl IntoResponse, ApiError> {
    state
        .revoke_token_handler()
        .handle(RevokeTokenCommand {
            refresh_token: request.refresh_token,
        })
        .await?;
    Ok(Json(MessageResponse::new("Token revoked.")))
}
