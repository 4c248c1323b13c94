//! Axum router for account endpoints.

use axum::routing::{get, post};
use axum::Router;

use super::handlers::{
    current_user, delete_user, get_user, login, refresh_token, register, revoke_token, update_user,
};
use crate::adapters::http::state::AppState;

/// Account routes, mounted at `/api/user`.
///
/// Registration, login and refresh are anonymous; the rest need a bearer token.
pub fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
        .route("/refresh-token", post(refresh_token))
        .route("/revoke-token", post(revoke_token))
        .route("/current", get(current_user))
        .route("/:id", get(get_user).put(update_user).delete(delete_user))
}

#[cfg(test)]
mod tests {
    use axum::body::Body;
    use axum::http::{header, Request, StatusCode};
    use axum::response::Response;
    use tower::ServiceExt;

    use crate::adapters::http::api_router;
    use crate::adapters::http::state::test_support::{test_app, TestApp};
    use crate::application::handlers::payment::test_support::MockGateway;
    use crate::domain::foundation::{AuthenticatedUser, UserId};

    async fn send(app: &TestApp, request: Request<Body>) -> Response {
        api_router(app.state.clone()).oneshot(request).await.unwrap()
    }

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    fn request(method: &str, uri: &str, token: Option<&str>, body: Option<&str>) -> Request<Body> {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
        }
        match body {
            Some(json) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(json.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        }
    }

    const ADA: &str = r#"{"email":"Ada@Example.com","password":"password1","first_name":"Ada","last_name":"Lovelace"}"#;

    /// Registers Ada and returns her id, with `token` accepted for her.
    async fn register_ada(app: &TestApp, token: &str) -> UserId {
        let response = send(app, request("POST", "/api/user/register", None, Some(ADA))).await;
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        let id: UserId = body["id"].as_str().unwrap().parse().unwrap();

        app.validator
            .add_token(token, AuthenticatedUser::new(id, "ada@example.com", None));
        id
    }

    #[tokio::test]
    async fn register_normalizes_email_and_rejects_duplicates() {
        let app = test_app(MockGateway::new());

        let response = send(&app, request("POST", "/api/user/register", None, Some(ADA))).await;
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["email"], "ada@example.com");
        assert_eq!(body["is_premium"], false);
        assert!(body.get("password_hash").is_none());

        let again = send(&app, request("POST", "/api/user/register", None, Some(ADA))).await;
        assert_eq!(again.status(), StatusCode::CONFLICT);
    }

    #[tokio::test]
    async fn short_password_is_rejected() {
        let app = test_app(MockGateway::new());

        let response = send(
            &app,
            request(
                "POST",
                "/api/user/register",
                None,
                Some(r#"{"email":"a@b.co","password":"short","first_name":"A","last_name":"B"}"#),
            ),
        )
        .await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn login_refresh_and_revoke() {
        let app = test_app(MockGateway::new());
        register_ada(&app, "ada-token").await;

        let response = send(
            &app,
            request(
                "POST",
                "/api/user/login",
                None,
                Some(r#"{"email":"ada@example.com","password":"password1"}"#),
            ),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);
        let login = body_json(response).await;
        assert!(!login["access_token"].as_str().unwrap().is_empty());
        let refresh = login["refresh_token"].as_str().unwrap().to_string();
        let refresh_body = format!(r#"{{"refresh_token":"{}"}}"#, refresh);

        let response = send(
            &app,
            request("POST", "/api/user/refresh-token", None, Some(&refresh_body)),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await["user"]["email"], "ada@example.com");

        let response = send(
            &app,
            request("POST", "/api/user/revoke-token", Some("ada-token"), Some(&refresh_body)),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await["message"], "Token revoked.");

        let response = send(
            &app,
            request("POST", "/api/user/refresh-token", None, Some(&refresh_body)),
        )
        .await;
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn wrong_password_is_401() {
        let app = test_app(MockGateway::new());
        register_ada(&app, "ada-token").await;

        let response = send(
            &app,
            request(
                "POST",
                "/api/user/login",
                None,
                Some(r#"{"email":"ada@example.com","password":"nope-nope"}"#),
            ),
        )
        .await;
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn current_user_returns_caller() {
        let app = test_app(MockGateway::new());
        let id = register_ada(&app, "ada-token").await;

        let response = send(&app, request("GET", "/api/user/current", Some("ada-token"), None)).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await["id"], id.to_string());
    }

    #[tokio::test]
    async fn owner_can_update_and_delete() {
        let app = test_app(MockGateway::new());
        let id = register_ada(&app, "ada-token").await;
        let uri = format!("/api/user/{}", id);

        let response = send(
            &app,
            request("PUT", &uri, Some("ada-token"), Some(r#"{"last_name":"King"}"#)),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["last_name"], "King");
        assert_eq!(body["first_name"], "Ada");

        let response = send(&app, request("DELETE", &uri, Some("ada-token"), None)).await;
        assert_eq!(response.status(), StatusCode::NO_CONTENT);

        let response = send(&app, request("GET", &uri, Some("ada-token"), None)).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn cannot_modify_another_account() {
        let app = test_app(MockGateway::new());
        let id = register_ada(&app, "ada-token").await;
        app.validator.add_token(
            "mallory-token",
            AuthenticatedUser::new(UserId::new(), "mallory@example.com", None),
        );

        let response = send(
            &app,
            request("DELETE", &format!("/api/user/{}", id), Some("mallory-token"), None),
        )
        .await;
        assert_eq!(response.status(), StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn revoking_unknown_token_is_400() {
        let app = test_app(MockGateway::new());
        register_ada(&app, "ada-token").await;

        let response = send(
            &app,
            request(
                "POST",
                "/api/user/revoke-token",
                Some("ada-token"),
                Some(r#"{"refresh_token":"never-issued"}"#),
            ),
        )
        .await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
