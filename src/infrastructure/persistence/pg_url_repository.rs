//! PostgreSQL implementation of the URL repository.

use std::future::Future;
use std::time::Duration;

use anyhow::anyhow;
use async_trait::async_trait;
use sqlx::PgPool;

use crate::domain::entities::UrlRecord;
use crate::domain::repositories::{StoreError, UrlRepository};

const SERIALIZATION_FAILURE: &str = "40001";
const DEADLOCK_DETECTED: &str = "40P01";

/// PostgreSQL repository for URL records.
///
/// Uses prepared statements throughout. Uniqueness of both the token and
/// the long URL is delegated to the constraints created by the migrations;
/// unique violations are classified back into [`StoreError`] variants by
/// constraint name. Every query is bounded by `op_timeout`.
pub struct PgUrlRepository {
    pool: PgPool,
    op_timeout: Duration,
}

impl PgUrlRepository {
    /// Creates a new repository over a connection pool.
    pub fn new(pool: PgPool, op_timeout: Duration) -> Self {
        Self { pool, op_timeout }
    }

    async fn bounded<T>(
        &self,
        query: impl Future<Output = Result<T, sqlx::Error>>,
    ) -> Result<T, StoreError> {
        tokio::time::timeout(self.op_timeout, query)
            .await
            .map_err(|_| StoreError::Timeout(self.op_timeout))?
            .map_err(map_sqlx_error)
    }
}

#[async_trait]
impl UrlRepository for PgUrlRepository {
    async fn find_by_long_url(&self, long_url: &str) -> Result<Option<UrlRecord>, StoreError> {
        let row = self
            .bounded(
                sqlx::query_as::<_, (String, String, i64)>(
                    "SELECT long_url, short_token, click_count FROM url_records WHERE long_url = $1",
                )
                .bind(long_url)
                .fetch_optional(&self.pool),
            )
            .await?;

        Ok(row.map(record_from_row))
    }

    async fn find_by_token(&self, token: &str) -> Result<Option<UrlRecord>, StoreError> {
        let row = self
            .bounded(
                sqlx::query_as::<_, (String, String, i64)>(
                    "SELECT long_url, short_token, click_count FROM url_records WHERE short_token = $1",
                )
                .bind(token)
                .fetch_optional(&self.pool),
            )
            .await?;

        Ok(row.map(record_from_row))
    }

    async fn insert(&self, record: UrlRecord) -> Result<(), StoreError> {
        self.bounded(
            sqlx::query(
                "INSERT INTO url_records (short_token, long_url, click_count) VALUES ($1, $2, $3)",
            )
            .bind(&record.short_token)
            .bind(&record.long_url)
            .bind(record.click_count)
            .execute(&self.pool),
        )
        .await?;

        Ok(())
    }

    async fn increment_clicks(&self, token: &str) -> Result<Option<i64>, StoreError> {
        self.bounded(
            sqlx::query_scalar::<_, i64>(
                "UPDATE url_records SET click_count = click_count + 1 \
                 WHERE short_token = $1 RETURNING click_count",
            )
            .bind(token)
            .fetch_optional(&self.pool),
        )
        .await
    }
}

fn record_from_row((long_url, short_token, click_count): (String, String, i64)) -> UrlRecord {
    UrlRecord {
        long_url,
        short_token,
        click_count,
    }
}

fn map_sqlx_error(e: sqlx::Error) -> StoreError {
    if let Some(db) = e.as_database_error() {
        if db.is_unique_violation() {
            return classify_unique_violation(db.constraint());
        }

        if matches!(
            db.code().as_deref(),
            Some(SERIALIZATION_FAILURE) | Some(DEADLOCK_DETECTED)
        ) {
            return StoreError::WriteConflict;
        }
    }

    StoreError::Backend(anyhow!(e))
}

/// Maps a unique-violation constraint name onto the conflicting column.
///
/// The schema has exactly two unique constraints: the primary key on
/// `short_token` and `url_records_long_url_key`.
fn classify_unique_violation(constraint: Option<&str>) -> StoreError {
    match constraint {
        Some(name) if name.contains("long_url") => StoreError::DuplicateLongUrl,
        _ => StoreError::DuplicateToken,
    }
}
