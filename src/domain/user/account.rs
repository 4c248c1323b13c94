//! User account aggregate.
//!
//! Holds identity, the hashed password, the current refresh token and the
//! premium entitlement window.

use crate::domain::foundation::{Timestamp, UserId, ValidationError};
use serde::{Deserialize, Serialize};

/// Minimum accepted password length.
pub const MIN_PASSWORD_LENGTH: usize = 8;

/// A registered user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserAccount {
    pub id: UserId,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub gender: Option<String>,

    /// PHC-format password hash.
    #[serde(skip_serializing)]
    pub password_hash: String,

    #[serde(skip_serializing)]
    pub refresh_token: Option<String>,
    pub refresh_token_expires_at: Option<Timestamp>,

    pub is_premium: bool,
    pub premium_expires_at: Option<Timestamp>,

    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl UserAccount {
    /// Creates a new non-premium account.
    pub fn register(
        email: &str,
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        gender: Option<String>,
        password_hash: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        let now = Timestamp::now();
        Ok(Self {
            id: UserId::new(),
            email: normalize_email(email)?,
            first_name: first_name.into().trim().to_string(),
            last_name: last_name.into().trim().to_string(),
            gender,
            password_hash: password_hash.into(),
            refresh_token: None,
            refresh_token_expires_at: None,
            is_premium: false,
            premium_expires_at: None,
            created_at: now,
            updated_at: now,
        })
    }

    /// True while the premium window is open at `now`.
    pub fn has_premium_access(&self, now: &Timestamp) -> bool {
        self.is_premium
            && self
                .premium_expires_at
                .map(|expiry| expiry.is_after(now))
                .unwrap_or(false)
    }

    /// Opens (or re-opens) the premium window for `duration_days` from `now`.
    ///
    /// Re-applying simply resets the expiry.
    pub fn grant_premium(&mut self, now: Timestamp, duration_days: i64) {
        self.is_premium = true;
        self.premium_expires_at = Some(now.add_days(duration_days));
        self.updated_at = now;
    }

    pub fn set_refresh_token(&mut self, token: impl Into<String>, expires_at: Timestamp) {
        self.refresh_token = Some(token.into());
        self.refresh_token_expires_at = Some(expires_at);
        self.updated_at = Timestamp::now();
    }

    pub fn clear_refresh_token(&mut self) {
        self.refresh_token = None;
        self.refresh_token_expires_at = None;
        self.updated_at = Timestamp::now();
    }

    /// True when `token` matches the stored refresh token and it has not expired.
    pub fn refresh_token_is_valid(&self, token: &str, now: &Timestamp) -> bool {
        match (&self.refresh_token, &self.refresh_token_expires_at) {
            (Some(stored), Some(expiry)) => stored == token && expiry.is_after(now),
            _ => false,
        }
    }

    /// Display name used in tokens and responses.
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
            .trim()
            .to_string()
    }
}

/// Lowercases and checks the basic `local@domain.tld` shape.
pub fn normalize_email(email: &str) -> Result<String, ValidationError> {
    let email = email.trim().to_lowercase();
    if email.is_empty() {
        return Err(ValidationError::empty_field("email"));
    }
    let valid = match email.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && !domain.contains('@')
                && domain.contains('.')
                && !domain.starts_with('.')
                && !domain.ends_with('.')
        }
        None => false,
    };
    if !valid {
        return Err(ValidationError::invalid_format(
            "email",
            "expected an address like name@example.com",
        ));
    }
    Ok(email)
}

/// Checks the password policy before hashing.
pub fn validate_password(password: &str) -> Result<(), ValidationError> {
    if password.chars().count() < MIN_PASSWORD_LENGTH {
        return Err(ValidationError::too_short("password", MIN_PASSWORD_LENGTH));
    }
    Ok(())
}
