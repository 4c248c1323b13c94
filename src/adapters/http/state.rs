//! Shared application state for the HTTP adapters.

use std::sync::Arc;

use crate::application::handlers::movie::{
    CreateMovieHandler, DeleteMovieHandler, GetMovieHandler, ListMoviesHandler, UpdateMovieHandler,
};
use crate::application::handlers::payment::{
    GetUserTransactionsHandler, HandlePaymentWebhookHandler, InitializePaymentHandler,
    PaymentSettlement, VerifyPaymentHandler,
};
use crate::application::handlers::user::{
    DeleteUserHandler, GetUserHandler, LoginUserHandler, RefreshTokenHandler, RegisterUserHandler,
    RevokeTokenHandler, UpdateUserHandler,
};
use crate::ports::{
    EntitlementService, MovieRepository, PasswordHasher, PaymentGateway, PaymentRepository,
    SessionValidator, TokenIssuer, UserRepository,
};

/// Dependencies shared by every route.
///
/// Cloned per request; every field is an `Arc`, so handlers are built on
/// demand from it.
#[derive(Clone)]
pub struct AppState {
    pub payment_repository: Arc<dyn PaymentRepository>,
    pub movie_repository: Arc<dyn MovieRepository>,
    pub user_repository: Arc<dyn UserRepository>,
    pub payment_gateway: Arc<dyn PaymentGateway>,
    pub entitlements: Arc<dyn EntitlementService>,
    pub password_hasher: Arc<dyn PasswordHasher>,
    pub token_issuer: Arc<dyn TokenIssuer>,
    pub session_validator: Arc<dyn SessionValidator>,
    pub premium_duration_days: i64,
}

impl AppState {
    fn settlement(&self) -> PaymentSettlement {
        PaymentSettlement::new(
            self.payment_repository.clone(),
            self.entitlements.clone(),
            self.premium_duration_days,
        )
    }

    // Payments

    pub fn initialize_payment_handler(&self) -> InitializePaymentHandler {
        InitializePaymentHandler::new(self.payment_gateway.clone(), self.payment_repository.clone())
    }

    pub fn verify_payment_handler(&self) -> VerifyPaymentHandler {
        VerifyPaymentHandler::new(self.payment_gateway.clone(), self.settlement())
    }

    pub fn payment_webhook_handler(&self) -> HandlePaymentWebhookHandler {
        HandlePaymentWebhookHandler::new(self.settlement())
    }

    pub fn user_transactions_handler(&self) -> GetUserTransactionsHandler {
        GetUserTransactionsHandler::new(self.payment_repository.clone())
    }

    // Movies

    pub fn create_movie_handler(&self) -> CreateMovieHandler {
        CreateMovieHandler::new(self.movie_repository.clone())
    }

    pub fn update_movie_handler(&self) -> UpdateMovieHandler {
        UpdateMovieHandler::new(self.movie_repository.clone())
    }

    pub fn delete_movie_handler(&self) -> DeleteMovieHandler {
        DeleteMovieHandler::new(self.movie_repository.clone())
    }

    pub fn get_movie_handler(&self) -> GetMovieHandler {
        GetMovieHandler::new(self.movie_repository.clone(), self.entitlements.clone())
    }

    pub fn list_movies_handler(&self) -> ListMoviesHandler {
        ListMoviesHandler::new(self.movie_repository.clone(), self.entitlements.clone())
    }

    // Users

    pub fn register_user_handler(&self) -> RegisterUserHandler {
        RegisterUserHandler::new(self.user_repository.clone(), self.password_hasher.clone())
    }

    pub fn login_user_handler(&self) -> LoginUserHandler {
        LoginUserHandler::new(
            self.user_repository.clone(),
            self.password_hasher.clone(),
            self.token_issuer.clone(),
        )
    }

    pub fn get_user_handler(&self) -> GetUserHandler {
        GetUserHandler::new(self.user_repository.clone())
    }

    pub fn update_user_handler(&self) -> UpdateUserHandler {
        UpdateUserHandler::new(self.user_repository.clone())
    }

    pub fn delete_user_handler(&self) -> DeleteUserHandler {
        DeleteUserHandler::new(self.user_repository.clone())
    }

    pub fn refresh_token_handler(&self) -> RefreshTokenHandler {
        RefreshTokenHandler::new(self.user_repository.clone(), self.token_issuer.clone())
    }

    pub fn revoke_token_handler(&self) -> RevokeTokenHandler {
        RevokeTokenHandler::new(self.user_repository.clone())
    }
}
