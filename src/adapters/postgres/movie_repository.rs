//! PostgreSQL implementation of MovieRepository.

use crate::domain::foundation::{Amount, DomainError, ErrorCode, MovieId};
use crate::domain::movie::Movie;
use crate::ports::MovieRepository;
use async_trait::async_trait;
use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

pub struct PostgresMovieRepository {
    pool: PgPool,
}

impl PostgresMovieRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct MovieRow {
    id: Uuid,
    name: String,
    cost: Decimal,
    is_premium: bool,
}

impl TryFrom<MovieRow> for Movie {
    type Error = DomainError;

    fn try_from(row: MovieRow) -> Result<Self, Self::Error> {
        Ok(Movie {
            id: MovieId::from_uuid(row.id),
            name: row.name,
            cost: Amount::new(row.cost).map_err(|e| {
                DomainError::new(ErrorCode::DatabaseError, format!("Invalid cost: {}", e))
            })?,
            is_premium: row.is_premium,
        })
    }
}

fn not_found(id: &MovieId) -> DomainError {
    DomainError::new(ErrorCode::MovieNotFound, format!("Movie {} not found", id))
}

#[async_trait]
impl MovieRepository for PostgresMovieRepository {
    async fn list(&self) -> Result<Vec<Movie>, DomainError> {
        let rows: Vec<MovieRow> =
            sqlx::query_as("SELECT id, name, cost, is_premium FROM movies ORDER BY name")
                .fetch_all(&self.pool)
                .await
                .map_err(|e| {
                    DomainError::new(ErrorCode::DatabaseError, format!("Failed to list movies: {}", e))
                })?;

        rows.into_iter().map(Movie::try_from).collect()
    }

    async fn find_by_id(&self, id: &MovieId) -> Result<Option<Movie>, DomainError> {
        let row: Option<MovieRow> =
            sqlx::query_as("SELECT id, name, cost, is_premium FROM movies WHERE id = $1")
                .bind(id.as_uuid())
                .fetch_optional(&self.pool)
                .await
                .map_err(|e| {
                    DomainError::new(ErrorCode::DatabaseError, format!("Failed to find movie: {}", e))
                })?;

        row.map(Movie::try_from).transpose()
    }

    async fn create(&self, movie: &Movie) -> Result<(), DomainError> {
        sqlx::query("INSERT INTO movies (id, name, cost, is_premium) VALUES ($1, $2, $3, $4)")
            .bind(movie.id.as_uuid())
            .bind(&movie.name)
            .bind(movie.cost.as_decimal())
            .bind(movie.is_premium)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                DomainError::new(ErrorCode::DatabaseError, format!("Failed to save movie: {}", e))
            })?;

        Ok(())
    }

    async fn update(&self, movie: &Movie) -> Result<(), DomainError> {
        let result = sqlx::query(
            r#"
            UPDATE movies SET
                name = $2,
                cost = $3,
                is_premium = $4
            WHERE id = $1
            "#,
        )
        .bind(movie.id.as_uuid())
        .bind(&movie.name)
        .bind(movie.cost.as_decimal())
        .bind(movie.is_premium)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(ErrorCode::DatabaseError, format!("Failed to update movie: {}", e))
        })?;

        if result.rows_affected() == 0 {
            return Err(not_found(&movie.id));
        }

        Ok(())
    }

    async fn delete(&self, id: &MovieId) -> Result<(), DomainError> {
        let result = sqlx::query("DELETE FROM movies WHERE id = $1")
            .bind(id.as_uuid())
            .execute(&self.pool)
            .await
            .map_err(|e| {
                DomainError::new(ErrorCode::DatabaseError, format!("Failed to delete movie: {}", e))
            })?;

        if result.rows_affected() == 0 {
            return Err(not_found(id));
        }

        Ok(())
    }
}
