//! PostgreSQL implementation of PaymentRepository.
//!
//! Status transitions are a single conditional UPDATE guarded by the row's
//! `version`. Reference uniqueness is enforced by the
//! `payments_reference_key` constraint.

use crate::domain::foundation::{
    Amount, DomainError, ErrorCode, PaymentId, PaymentReference, StateMachine, Timestamp, UserId,
};
use crate::domain::payment::{Payment, PaymentStatus};
use crate::ports::PaymentRepository;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

const REFERENCE_CONSTRAINT: &str = "payments_reference_key";

/// PostgreSQL implementation of the PaymentRepository port.
pub struct PostgresPaymentRepository {
    pool: PgPool,
}

impl PostgresPaymentRepository {
    /// Creates a new PostgresPaymentRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Database row representation of a payment.
#[derive(Debug, sqlx::FromRow)]
struct PaymentRow {
    id: Uuid,
    user_id: Uuid,
    amount: Decimal,
    reference: String,
    status: String,
    transaction_date: DateTime<Utc>,
    version: i64,
}

impl TryFrom<PaymentRow> for Payment {
    type Error = DomainError;

    fn try_from(row: PaymentRow) -> Result<Self, Self::Error> {
        let status: PaymentStatus = row
            .status
            .parse()
            .map_err(|e: String| DomainError::new(ErrorCode::DatabaseError, e))?;
        let amount = Amount::new(row.amount).map_err(|e| {
            DomainError::new(ErrorCode::DatabaseError, format!("Invalid amount: {}", e))
        })?;
        let reference = PaymentReference::new(row.reference).map_err(|e| {
            DomainError::new(ErrorCode::DatabaseError, format!("Invalid reference: {}", e))
        })?;

        Ok(Payment {
            id: PaymentId::from_uuid(row.id),
            user_id: UserId::from_uuid(row.user_id),
            amount,
            reference,
            status,
            transaction_date: Timestamp::from_datetime(row.transaction_date),
            version: row.version,
        })
    }
}

#[async_trait]
impl PaymentRepository for PostgresPaymentRepository {
    async fn find_by_reference(
        &self,
        reference: &PaymentReference,
    ) -> Result<Option<Payment>, DomainError> {
        let row: Option<PaymentRow> = sqlx::query_as(
            r#"
            SELECT id, user_id, amount, reference, status, transaction_date, version
            FROM payments
            WHERE reference = $1
            "#,
        )
        .bind(reference.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(ErrorCode::DatabaseError, format!("Failed to find payment: {}", e))
        })?;

        row.map(Payment::try_from).transpose()
    }

    async fn find_by_user(&self, user_id: &UserId) -> Result<Vec<Payment>, DomainError> {
        let rows: Vec<PaymentRow> = sqlx::query_as(
            r#"
            SELECT id, user_id, amount, reference, status, transaction_date, version
            FROM payments
            WHERE user_id = $1
            ORDER BY transaction_date DESC
            "#,
        )
        .bind(user_id.as_uuid())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(ErrorCode::DatabaseError, format!("Failed to list payments: {}", e))
        })?;

        rows.into_iter().map(Payment::try_from).collect()
    }

    async fn create(&self, payment: &Payment) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO payments (
                id, user_id, amount, reference, status, transaction_date, version
            ) VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(payment.id.as_uuid())
        .bind(payment.user_id.as_uuid())
        .bind(payment.amount.as_decimal())
        .bind(payment.reference.as_str())
        .bind(payment.status.as_str())
        .bind(payment.transaction_date.as_datetime())
        .bind(payment.version)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(db_err) = &e {
                if db_err.constraint() == Some(REFERENCE_CONSTRAINT) {
                    return DomainError::new(
                        ErrorCode::DuplicateReference,
                        format!("Payment with reference {} already exists", payment.reference),
                    );
                }
            }
            DomainError::new(ErrorCode::DatabaseError, format!("Failed to save payment: {}", e))
        })?;

        Ok(())
    }

    async fn try_transition_status(
        &self,
        reference: &PaymentReference,
        new_status: PaymentStatus,
    ) -> Result<bool, DomainError> {
        let Some(current) = self.find_by_reference(reference).await? else {
            return Ok(false);
        };
        if !current.status.can_transition_to(&new_status) {
            return Ok(false);
        }

        let result = sqlx::query(
            r#"
            UPDATE payments SET
                status = $2,
                version = version + 1
            WHERE reference = $1 AND version = $3
            "#,
        )
        .bind(reference.as_str())
        .bind(new_status.as_str())
        .bind(current.version)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(ErrorCode::DatabaseError, format!("Failed to update payment: {}", e))
        })?;

        // Zero rows means a concurrent writer bumped the version first.
        Ok(result.rows_affected() == 1)
    }
}
