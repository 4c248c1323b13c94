//! HS256 JWT adapter.
//!
//! Issues the access tokens handed out at login and refresh, and validates
//! them on every authenticated request. Validation checks:
//!
//! - **Signature**: HMAC-SHA256 with the configured secret
//! - **Issuer (iss)** and **Audience (aud)**: must match configuration
//! - **Expiry (exp)**: must be in the future
//!
//! Refresh tokens are opaque random strings, not JWTs; they are stored on the
//! account and compared there.

use async_trait::async_trait;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use rand::RngCore;
use secrecy::{ExposeSecret, Secret};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::foundation::{AuthError, AuthenticatedUser, Timestamp, UserId, ROLE_USER};
use crate::domain::user::UserAccount;
use crate::ports::{IssuedToken, SessionValidator, TokenIssuer};

/// Configuration for the JWT adapter.
#[derive(Clone)]
pub struct JwtConfig {
    pub secret: Secret<String>,
    pub issuer: String,
    pub audience: String,
    pub access_token_minutes: i64,
    pub refresh_token_days: i64,
}

impl std::fmt::Debug for JwtConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtConfig")
            .field("secret", &"[REDACTED]")
            .field("issuer", &self.issuer)
            .field("audience", &self.audience)
            .field("access_token_minutes", &self.access_token_minutes)
            .field("refresh_token_days", &self.refresh_token_days)
            .finish()
    }
}

impl JwtConfig {
    pub fn new(
        secret: impl Into<String>,
        issuer: impl Into<String>,
        audience: impl Into<String>,
    ) -> Self {
        Self {
            secret: Secret::new(secret.into()),
            issuer: issuer.into(),
            audience: audience.into(),
            access_token_minutes: 60,
            refresh_token_days: 7,
        }
    }

    pub fn with_lifetimes(mut self, access_token_minutes: i64, refresh_token_days: i64) -> Self {
        self.access_token_minutes = access_token_minutes;
        self.refresh_token_days = refresh_token_days;
        self
    }
}

/// Access token claims.
#[derive(Debug, Serialize, Deserialize)]
struct AccessClaims {
    /// Subject - the account id
    sub: String,

    /// Token id, unique per issue
    jti: String,

    iss: String,
    aud: String,

    /// Expiry (Unix epoch seconds)
    exp: i64,

    /// Issued at
    iat: i64,

    email: String,

    /// Full display name
    #[serde(default)]
    name: Option<String>,

    #[serde(rename = "firstName", default)]
    first_name: Option<String>,

    #[serde(rename = "lastName", default)]
    last_name: Option<String>,

    #[serde(default)]
    roles: Vec<String>,
}

/// Signs and validates access tokens with a shared secret.
pub struct JwtTokenService {
    config: JwtConfig,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
}

impl JwtTokenService {
    pub fn new(config: JwtConfig) -> Self {
        let secret = config.secret.expose_secret().as_bytes();
        let encoding_key = EncodingKey::from_secret(secret);
        let decoding_key = DecodingKey::from_secret(secret);
        Self {
            config,
            encoding_key,
            decoding_key,
        }
    }

    fn validation(&self) -> Validation {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_issuer(&[&self.config.issuer]);
        validation.set_audience(&[&self.config.audience]);
        validation.validate_exp = true;
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp", "iss", "aud", "sub"]);
        validation
    }
}

impl TokenIssuer for JwtTokenService {
    fn issue_access_token(&self, user: &UserAccount) -> Result<IssuedToken, AuthError> {
        let now = Timestamp::now();
        let expires_at = now.add_minutes(self.config.access_token_minutes);
        let full_name = user.full_name();

        let claims = AccessClaims {
            sub: user.id.to_string(),
            jti: Uuid::new_v4().to_string(),
            iss: self.config.issuer.clone(),
            aud: self.config.audience.clone(),
            exp: expires_at.as_unix_secs(),
            iat: now.as_unix_secs(),
            email: user.email.clone(),
            name: (!full_name.is_empty()).then_some(full_name),
            first_name: Some(user.first_name.clone()),
            last_name: Some(user.last_name.clone()),
            roles: vec![ROLE_USER.to_string()],
        };

        let token = encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| {
                tracing::error!("Failed to sign access token: {}", e);
                AuthError::service_unavailable("Failed to sign access token")
            })?;

        Ok(IssuedToken { token, expires_at })
    }

    fn issue_refresh_token(&self) -> IssuedToken {
        let mut bytes = [0u8; 32];
        rand::thread_rng().fill_bytes(&mut bytes);
        IssuedToken {
            token: hex::encode(bytes),
            expires_at: Timestamp::now().add_days(self.config.refresh_token_days),
        }
    }
}

#[async_trait]
impl SessionValidator for JwtTokenService {
    async fn validate(&self, token: &str) -> Result<AuthenticatedUser, AuthError> {
        let data = decode::<AccessClaims>(token, &self.decoding_key, &self.validation())
            .map_err(|e| {
                use jsonwebtoken::errors::ErrorKind;
                match e.kind() {
                    ErrorKind::ExpiredSignature => {
                        tracing::debug!("Token expired");
                        AuthError::TokenExpired
                    }
                    ErrorKind::InvalidIssuer | ErrorKind::InvalidAudience => {
                        tracing::warn!("Token issued for another party: {}", e);
                        AuthError::InvalidToken
                    }
                    _ => {
                        tracing::debug!("Token rejected: {}", e);
                        AuthError::InvalidToken
                    }
                }
            })?;

        let claims = data.claims;
        let id: UserId = claims.sub.parse().map_err(|_| {
            tracing::warn!("Token subject is not an account id");
            AuthError::InvalidToken
        })?;

        let roles = if claims.roles.is_empty() {
            vec![ROLE_USER.to_string()]
        } else {
            claims.roles
        };

        Ok(AuthenticatedUser::new(id, claims.email, claims.name).with_roles(roles))
    }
}
