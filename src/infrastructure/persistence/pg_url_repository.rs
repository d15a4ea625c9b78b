//! PostgreSQL implementation of the URL repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::entities::{RedirectLog, UrlRecord, UrlStats};
use crate::domain::repositories::{StoreError, UrlRepository};
use crate::utils::db_error::is_unique_violation_on_code;

/// PostgreSQL repository for URL records and redirect logs.
///
/// Uniqueness of short codes is enforced by the `urls_short_code_key`
/// constraint; a violation is reported as [`StoreError::Conflict`].
pub struct PgUrlRepository {
    pool: Arc<PgPool>,
}

impl PgUrlRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct UrlRow {
    id: Uuid,
    original_url: String,
    short_code: String,
    custom_alias: Option<String>,
    created_at: DateTime<Utc>,
    expires_at: Option<DateTime<Utc>>,
}

impl From<UrlRow> for UrlRecord {
    fn from(row: UrlRow) -> Self {
        UrlRecord::new(
            row.id,
            row.original_url,
            row.short_code,
            row.custom_alias,
            row.created_at,
            row.expires_at,
        )
    }
}

fn backend_error(e: sqlx::Error) -> StoreError {
    tracing::error!(error = %e, "Database operation failed");
    StoreError::backend(e)
}

#[async_trait]
impl UrlRepository for PgUrlRepository {
    async fn save_url(&self, record: UrlRecord) -> Result<(), StoreError> {
        let result = sqlx::query(
            r#"
            INSERT INTO urls (id, original_url, short_code, custom_alias, created_at, expires_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(record.id)
        .bind(&record.original_url)
        .bind(&record.short_code)
        .bind(&record.custom_alias)
        .bind(record.created_at)
        .bind(record.expires_at)
        .execute(self.pool.as_ref())
        .await;

        match result {
            Ok(_) => Ok(()),
            Err(e) if is_unique_violation_on_code(&e) => {
                Err(StoreError::Conflict(record.short_code))
            }
            Err(e) => Err(backend_error(e)),
        }
    }

    async fn get_url(&self, short_code: &str) -> Result<UrlRecord, StoreError> {
        let row = sqlx::query_as::<_, UrlRow>(
            r#"
            SELECT id, original_url, short_code, custom_alias, created_at, expires_at
            FROM urls
            WHERE short_code = $1
            "#,
        )
        .bind(short_code)
        .fetch_optional(self.pool.as_ref())
        .await
        .map_err(backend_error)?;

        row.map(UrlRecord::from)
            .ok_or_else(|| StoreError::NotFound(short_code.to_string()))
    }

    async fn save_redirect_log(&self, entry: RedirectLog) -> Result<(), StoreError> {
        sqlx::query(
            r#"
            INSERT INTO redirect_logs (id, short_code, accessed_at, referrer)
            VALUES ($1, $2, $3, $4)
            "#,
        )
        .bind(entry.id)
        .bind(&entry.short_code)
        .bind(entry.accessed_at)
        .bind(&entry.referrer)
        .execute(self.pool.as_ref())
        .await
        .map_err(backend_error)?;

        Ok(())
    }

    async fn get_stats(&self, short_code: &str) -> Result<UrlStats, StoreError> {
        let mut tx = self.pool.begin().await.map_err(backend_error)?;

        sqlx::query("SET TRANSACTION ISOLATION LEVEL REPEATABLE READ READ ONLY")
            .execute(&mut *tx)
            .await
            .map_err(backend_error)?;

        let created_at: DateTime<Utc> =
            sqlx::query_scalar("SELECT created_at FROM urls WHERE short_code = $1")
                .bind(short_code)
                .fetch_optional(&mut *tx)
                .await
                .map_err(backend_error)?
                .ok_or_else(|| StoreError::NotFound(short_code.to_string()))?;

        let (redirect_count, last_accessed): (i64, Option<DateTime<Utc>>) = sqlx::query_as(
            r#"
            SELECT COUNT(*), MAX(accessed_at)
            FROM redirect_logs
            WHERE short_code = $1
            "#,
        )
        .bind(short_code)
        .fetch_one(&mut *tx)
        .await
        .map_err(backend_error)?;

        let referrers: Vec<String> = sqlx::query_scalar(
            r#"
            SELECT DISTINCT referrer
            FROM redirect_logs
            WHERE short_code = $1 AND referrer IS NOT NULL AND referrer <> ''
            ORDER BY referrer
            "#,
        )
        .bind(short_code)
        .fetch_all(&mut *tx)
        .await
        .map_err(backend_error)?;

        tx.commit().await.map_err(backend_error)?;

        Ok(UrlStats {
            created_at,
            redirect_count,
            last_accessed,
            referrers,
        })
    }

    async fn ping(&self) -> Result<(), StoreError> {
        sqlx::query("SELECT 1")
            .execute(self.pool.as_ref())
            .await
            .map_err(backend_error)?;

        Ok(())
    }
}
