//! HTTP adapters - REST API over axum.
//!
//! Each area has its own module with request bodies, handlers and routes:
//!
//! - `payment` - `/api/v1/payments`
//! - `movie` - `/api/v1/movies`
//! - `user` - `/api/user`
//!
//! Bearer authentication runs as one middleware in front of all of them;
//! individual handlers decide whether a caller is required.

pub mod error;
pub mod middleware;
pub mod movie;
pub mod payment;
pub mod state;
pub mod user;

use std::time::Duration;

use axum::http::HeaderValue;
use axum::Router;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

pub use error::{ApiError, ErrorResponse};
pub use middleware::{auth_middleware, AuthState, OptionalAuth, RequireAuth};
pub use movie::movie_routes;
pub use payment::payment_routes;
pub use state::AppState;
pub use user::user_routes;

/// All API routes with authentication applied.
pub fn api_router(state: AppState) -> Router {
    let auth_state: AuthState = state.session_validator.clone();

    Router::new()
        .nest("/api/v1/payments", payment_routes())
        .nest("/api/v1/movies", movie_routes())
        .nest("/api/user", user_routes())
        .layer(axum::middleware::from_fn_with_state(auth_state, auth_middleware))
        .with_state(state)
}

/// Transport-level settings for the outer layers.
#[derive(Debug, Clone)]
pub struct HttpOptions {
    pub request_timeout: Duration,

    /// Allowed origins; empty or `*` allows any.
    pub cors_origins: Vec<String>,
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    let base = CorsLayer::new().allow_methods(Any).allow_headers(Any);

    if origins.is_empty() || origins.iter().any(|o| o == "*") {
        return base.allow_origin(Any);
    }

    let allowed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(origin = %origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();
    base.allow_origin(AllowOrigin::list(allowed))
}

/// Wraps `router` in request tracing, CORS and a per-request timeout.
pub fn with_http_layers(router: Router, options: &HttpOptions) -> Router {
    router
        .layer(TimeoutLayer::new(options.request_timeout))
        .layer(cors_layer(&options.cors_origins))
        .layer(TraceLayer::new_for_http())
}
