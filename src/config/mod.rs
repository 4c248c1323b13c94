//! Application configuration module
//!
//! Type-safe configuration loaded from environment variables with the
//! `config` and `dotenvy` crates. Variables use the `MOVIE_CATALOG` prefix and
//! `__` between nesting levels.
//!
//! # Example
//!
//! ```no_run
//! use movie_catalog::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//! ```

mod auth;
mod database;
mod error;
mod payment;
mod server;

pub use auth::AuthConfig;
pub use database::{DatabaseConfig, MEMORY_DATABASE_URL};
pub use error::{ConfigError, ValidationError};
pub use payment::{PaymentConfig, ResilienceConfig};
pub use server::{Environment, ServerConfig};

use serde::Deserialize;

/// Root application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,

    /// PostgreSQL connection, or `memory`
    pub database: DatabaseConfig,

    /// Access token signing
    pub auth: AuthConfig,

    /// Paystack and gateway resilience
    pub payment: PaymentConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// Loads `.env` if present, then reads variables such as:
    ///
    /// - `MOVIE_CATALOG__SERVER__PORT=8080` -> `server.port = 8080`
    /// - `MOVIE_CATALOG__DATABASE__URL=memory` -> `database.url = "memory"`
    /// - `MOVIE_CATALOG__PAYMENT__RESILIENCE__MAX_RETRIES=5`
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("MOVIE_CATALOG")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.server.validate()?;
        self.database.validate()?;
        self.auth.validate(&self.server.environment)?;
        self.payment.validate()?;
        if self.payment.resilience.deadline_secs >= self.server.request_timeout_secs {
            return Err(ValidationError::DeadlineExceedsRequestTimeout);
        }
        Ok(())
    }

    pub fn is_production(&self) -> bool {
        self.server.is_production()
    }
}
