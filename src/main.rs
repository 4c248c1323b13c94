//! Movie Catalog API server.

use std::error::Error;
use std::sync::Arc;

use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use movie_catalog::adapters::auth::{Argon2PasswordHasher, JwtTokenService};
use movie_catalog::adapters::entitlement::UserEntitlementService;
use movie_catalog::adapters::http::{api_router, with_http_layers, AppState};
use movie_catalog::adapters::memory::{
    InMemoryMovieRepository, InMemoryPaymentRepository, InMemoryUserRepository,
};
use movie_catalog::adapters::paystack::PaystackGateway;
use movie_catalog::adapters::postgres::{
    PostgresMovieRepository, PostgresPaymentRepository, PostgresUserRepository,
};
use movie_catalog::adapters::resilience::resilient_gateway_with_policy;
use movie_catalog::config::{AppConfig, DatabaseConfig, ServerConfig};
use movie_catalog::ports::{MovieRepository, PaymentGateway, PaymentRepository, UserRepository};

struct Repositories {
    payments: Arc<dyn PaymentRepository>,
    movies: Arc<dyn MovieRepository>,
    users: Arc<dyn UserRepository>,
}

fn init_tracing(server: &ServerConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&server.log_level));
    let registry = tracing_subscriber::registry().with(filter);

    if server.is_production() {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}

async fn repositories(config: &DatabaseConfig) -> Result<Repositories, Box<dyn Error>> {
    if config.is_memory() {
        tracing::warn!("Using in-memory repositories; data is lost on restart");
        return Ok(Repositories {
            payments: Arc::new(InMemoryPaymentRepository::new()),
            movies: Arc::new(InMemoryMovieRepository::new()),
            users: Arc::new(InMemoryUserRepository::new()),
        });
    }

    let pool = PgPoolOptions::new()
        .min_connections(config.min_connections)
        .max_connections(config.max_connections)
        .acquire_timeout(config.acquire_timeout())
        .connect(&config.url)
        .await?;

    if config.run_migrations {
        sqlx::migrate!("./migrations").run(&pool).await?;
        tracing::info!("Database migrations applied");
    }

    Ok(Repositories {
        payments: Arc::new(PostgresPaymentRepository::new(pool.clone())),
        movies: Arc::new(PostgresMovieRepository::new(pool.clone())),
        users: Arc::new(PostgresUserRepository::new(pool)),
    })
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let config = AppConfig::load()?;
    init_tracing(&config.server);
    config.validate()?;

    tracing::info!(environment = ?config.server.environment, "Starting movie catalog");
    if config.payment.is_test_mode() {
        tracing::info!("Paystack test mode");
    }

    let repos = repositories(&config.database).await?;

    let paystack: Arc<dyn PaymentGateway> =
        Arc::new(PaystackGateway::new(config.payment.to_paystack_config()));
    let gateway = resilient_gateway_with_policy(paystack, &config.payment.resilience.to_policy());

    let tokens = Arc::new(JwtTokenService::new(config.auth.to_jwt_config()));

    let state = AppState {
        payment_repository: repos.payments,
        movie_repository: repos.movies,
        user_repository: repos.users.clone(),
        payment_gateway: gateway,
        entitlements: Arc::new(UserEntitlementService::new(repos.users)),
        password_hasher: Arc::new(Argon2PasswordHasher::new()),
        token_issuer: tokens.clone(),
        session_validator: tokens,
        premium_duration_days: config.payment.premium_duration_days,
    };

    let app = with_http_layers(api_router(state), &config.server.http_options());

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received, stopping server...");
}
