//! PostgreSQL implementation of UserRepository.

use crate::domain::foundation::{DomainError, ErrorCode, Timestamp, UserId};
use crate::domain::user::UserAccount;
use crate::ports::UserRepository;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

const EMAIL_CONSTRAINT: &str = "users_email_key";

const SELECT_COLUMNS: &str = r#"
    SELECT id, email, first_name, last_name, gender, password_hash,
           refresh_token, refresh_token_expires_at, is_premium, premium_expires_at,
           created_at, updated_at
    FROM users
"#;

pub struct PostgresUserRepository {
    pool: PgPool,
}

impl PostgresUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct UserRow {
    id: Uuid,
    email: String,
    first_name: String,
    last_name: String,
    gender: Option<String>,
    password_hash: String,
    refresh_token: Option<String>,
    refresh_token_expires_at: Option<DateTime<Utc>>,
    is_premium: bool,
    premium_expires_at: Option<DateTime<Utc>>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<UserRow> for UserAccount {
    fn from(row: UserRow) -> Self {
        UserAccount {
            id: UserId::from_uuid(row.id),
            email: row.email,
            first_name: row.first_name,
            last_name: row.last_name,
            gender: row.gender,
            password_hash: row.password_hash,
            refresh_token: row.refresh_token,
            refresh_token_expires_at: row.refresh_token_expires_at.map(Timestamp::from_datetime),
            is_premium: row.is_premium,
            premium_expires_at: row.premium_expires_at.map(Timestamp::from_datetime),
            created_at: Timestamp::from_datetime(row.created_at),
            updated_at: Timestamp::from_datetime(row.updated_at),
        }
    }
}

fn map_write_error(e: sqlx::Error, email: &str, action: &str) -> DomainError {
    if let sqlx::Error::Database(db_err) = &e {
        if db_err.constraint() == Some(EMAIL_CONSTRAINT) {
            return DomainError::new(
                ErrorCode::Conflict,
                format!("Email {} is already registered", email),
            );
        }
    }
    DomainError::new(ErrorCode::DatabaseError, format!("Failed to {} user: {}", action, e))
}

fn find_error(e: sqlx::Error) -> DomainError {
    DomainError::new(ErrorCode::DatabaseError, format!("Failed to find user: {}", e))
}

fn not_found(id: &UserId) -> DomainError {
    DomainError::new(ErrorCode::UserNotFound, format!("User {} not found", id))
}

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn create(&self, user: &UserAccount) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO users (
                id, email, first_name, last_name, gender, password_hash,
                refresh_token, refresh_token_expires_at, is_premium, premium_expires_at,
                created_at, updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
            "#,
        )
        .bind(user.id.as_uuid())
        .bind(&user.email)
        .bind(&user.first_name)
        .bind(&user.last_name)
        .bind(&user.gender)
        .bind(&user.password_hash)
        .bind(&user.refresh_token)
        .bind(user.refresh_token_expires_at.map(|t| *t.as_datetime()))
        .bind(user.is_premium)
        .bind(user.premium_expires_at.map(|t| *t.as_datetime()))
        .bind(user.created_at.as_datetime())
        .bind(user.updated_at.as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| map_write_error(e, &user.email, "save"))?;

        Ok(())
    }

    async fn update(&self, user: &UserAccount) -> Result<(), DomainError> {
        let result = sqlx::query(
            r#"
            UPDATE users SET
                email = $2,
                first_name = $3,
                last_name = $4,
                gender = $5,
                password_hash = $6,
                refresh_token = $7,
                refresh_token_expires_at = $8,
                is_premium = $9,
                premium_expires_at = $10,
                updated_at = $11
            WHERE id = $1
            "#,
        )
        .bind(user.id.as_uuid())
        .bind(&user.email)
        .bind(&user.first_name)
        .bind(&user.last_name)
        .bind(&user.gender)
        .bind(&user.password_hash)
        .bind(&user.refresh_token)
        .bind(user.refresh_token_expires_at.map(|t| *t.as_datetime()))
        .bind(user.is_premium)
        .bind(user.premium_expires_at.map(|t| *t.as_datetime()))
        .bind(user.updated_at.as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| map_write_error(e, &user.email, "update"))?;

        if result.rows_affected() == 0 {
            return Err(not_found(&user.id));
        }

        Ok(())
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<UserAccount>, DomainError> {
        let sql = format!("{} WHERE id = $1", SELECT_COLUMNS);
        let row: Option<UserRow> = sqlx::query_as(&sql)
            .bind(id.as_uuid())
            .fetch_optional(&self.pool)
            .await
            .map_err(find_error)?;

        Ok(row.map(UserAccount::from))
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<UserAccount>, DomainError> {
        let sql = format!("{} WHERE email = $1", SELECT_COLUMNS);
        let row: Option<UserRow> = sqlx::query_as(&sql)
            .bind(email)
            .fetch_optional(&self.pool)
            .await
            .map_err(find_error)?;

        Ok(row.map(UserAccount::from))
    }

    async fn find_by_refresh_token(&self, token: &str) -> Result<Option<UserAccount>, DomainError> {
        let sql = format!("{} WHERE refresh_token = $1", SELECT_COLUMNS);
        let row: Option<UserRow> = sqlx::query_as(&sql)
            .bind(token)
            .fetch_optional(&self.pool)
            .await
            .map_err(find_error)?;

        Ok(row.map(UserAccount::from))
    }

    async fn set_premium_until(&self, id: &UserId, expires_at: Timestamp) -> Result<(), DomainError> {
        let result = sqlx::query(
            r#"
            UPDATE users SET
                is_premium = TRUE,
                premium_expires_at = $2,
                updated_at = NOW()
            WHERE id = $1
            "#,
        )
        .bind(id.as_uuid())
        .bind(expires_at.as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(ErrorCode::DatabaseError, format!("Failed to grant premium: {}", e))
        })?;

        if result.rows_affected() == 0 {
            return Err(not_found(id));
        }

        Ok(())
    }

    async fn delete(&self, id: &UserId) -> Result<(), DomainError> {
        sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id.as_uuid())
            .execute(&self.pool)
            .await
            .map_err(|e| {
                DomainError::new(ErrorCode::DatabaseError, format!("Failed to delete user: {}", e))
            })?;

        Ok(())
    }
}
