//! Mapping of domain errors onto HTTP responses.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use crate::domain::foundation::{DomainError, ErrorCode, ValidationError};

/// Error body returned by every endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorResponse {
    pub code: String,
    pub message: String,
}

impl ErrorResponse {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
        }
    }
}

/// Status and wire code for each domain error code.
pub fn status_for(code: ErrorCode) -> (StatusCode, &'static str) {
    match code {
        ErrorCode::ValidationFailed => (StatusCode::BAD_REQUEST, "VALIDATION_FAILED"),
        ErrorCode::BadRequest => (StatusCode::BAD_REQUEST, "BAD_REQUEST"),
        ErrorCode::NotFound => (StatusCode::NOT_FOUND, "NOT_FOUND"),
        ErrorCode::PaymentNotFound => (StatusCode::NOT_FOUND, "PAYMENT_NOT_FOUND"),
        ErrorCode::MovieNotFound => (StatusCode::NOT_FOUND, "MOVIE_NOT_FOUND"),
        ErrorCode::UserNotFound => (StatusCode::NOT_FOUND, "USER_NOT_FOUND"),
        ErrorCode::Conflict => (StatusCode::CONFLICT, "CONFLICT"),
        ErrorCode::DuplicateReference => (StatusCode::CONFLICT, "DUPLICATE_REFERENCE"),
        ErrorCode::ConcurrencyConflict => (StatusCode::CONFLICT, "CONCURRENCY_CONFLICT"),
        ErrorCode::Unauthorized => (StatusCode::UNAUTHORIZED, "UNAUTHORIZED"),
        ErrorCode::Forbidden => (StatusCode::FORBIDDEN, "FORBIDDEN"),
        ErrorCode::GatewayUnavailable => (StatusCode::SERVICE_UNAVAILABLE, "GATEWAY_UNAVAILABLE"),
        ErrorCode::GatewayError => (StatusCode::BAD_GATEWAY, "GATEWAY_ERROR"),
        ErrorCode::DatabaseError => (StatusCode::INTERNAL_SERVER_ERROR, "DATABASE_ERROR"),
        ErrorCode::InternalError => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR"),
    }
}

/// API error type that converts domain errors to HTTP responses.
#[derive(Debug)]
pub struct ApiError(pub DomainError);

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        Self(err)
    }
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        Self(err.into())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code) = status_for(self.0.code);

        // Internal details stay in the log
        let message = if status.is_server_error() && status != StatusCode::SERVICE_UNAVAILABLE {
            tracing::error!(error = %self.0, "Request failed");
            "An internal error occurred".to_string()
        } else {
            self.0.message
        };

        (status, Json(ErrorResponse::new(code, message))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[test]
    fn not_found_family_maps_to_404() {
        for code in [
            ErrorCode::NotFound,
            ErrorCode::PaymentNotFound,
            ErrorCode::MovieNotFound,
            ErrorCode::UserNotFound,
        ] {
            assert_eq!(status_for(code).0, StatusCode::NOT_FOUND);
        }
    }

    #[test]
    fn wire_code_matches_display() {
        for code in [
            ErrorCode::ValidationFailed,
            ErrorCode::Conflict,
            ErrorCode::Unauthorized,
            ErrorCode::GatewayUnavailable,
            ErrorCode::InternalError,
        ] {
            assert_eq!(status_for(code).1, code.to_string());
        }
    }

    #[tokio::test]
    async fn validation_error_renders_400_with_message() {
        let response = ApiError(DomainError::validation("email", "Email is required")).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = body_json(response).await;
        assert_eq!(body["code"], "VALIDATION_FAILED");
        assert_eq!(body["message"], "Email is required");
    }

    #[tokio::test]
    async fn database_error_hides_details() {
        let response = ApiError(DomainError::database("connection refused to 10.0.0.3")).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body = body_json(response).await;
        assert_eq!(body["code"], "DATABASE_ERROR");
        assert!(!body["message"].as_str().unwrap().contains("10.0.0.3"));
    }

    #[test]
    fn unauthorized_maps_to_401() {
        let response =
            ApiError(DomainError::new(ErrorCode::Unauthorized, "Invalid email or password.")).into_response();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }
}
