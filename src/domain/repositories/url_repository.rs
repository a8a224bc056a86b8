//! Repository trait for URL record data access.

use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::entities::UrlRecord;

/// Failures reported by a [`UrlRepository`] implementation.
///
/// The two duplicate variants let callers tell a token collision (retry
/// with a fresh token) apart from losing the get-or-create race on the
/// long URL (refetch the winning record). Everything else is surfaced to
/// clients as a generic store failure.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The short token is already mapped.
    #[error("short token already exists")]
    DuplicateToken,

    /// The long URL is already mapped, a concurrent insert won.
    #[error("long URL already exists")]
    DuplicateLongUrl,

    /// The backend reported a transient write conflict; safe to retry.
    #[error("write conflict")]
    WriteConflict,

    /// The operation did not complete within the configured bound.
    #[error("store operation timed out after {0:?}")]
    Timeout(Duration),

    /// Any other backend failure.
    #[error(transparent)]
    Backend(#[from] anyhow::Error),
}

/// Repository interface for URL records.
///
/// This is the only path to the persistence layer. Implementations must
/// keep `short_token` and `long_url` unique under concurrent inserts and
/// increment click counts without losing updates.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgUrlRepository`] - PostgreSQL
/// - [`crate::infrastructure::persistence::InMemoryUrlRepository`] - process-local map,
///   used as the development fallback and in tests
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UrlRepository: Send + Sync {
    /// Finds a record by its original long URL (byte-equal match).
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Timeout`] or [`StoreError::Backend`] on store failures.
    async fn find_by_long_url(&self, long_url: &str) -> Result<Option<UrlRecord>, StoreError>;

    /// Finds a record by its short token.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Timeout`] or [`StoreError::Backend`] on store failures.
    async fn find_by_token(&self, token: &str) -> Result<Option<UrlRecord>, StoreError>;

    /// Inserts a new record.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::DuplicateToken`] if `record.short_token` is taken,
    /// [`StoreError::DuplicateLongUrl`] if `record.long_url` is already mapped.
    async fn insert(&self, record: UrlRecord) -> Result<(), StoreError>;

    /// Atomically increments the click count for `token`.
    ///
    /// Returns the updated count, or `None` when no record matches.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::WriteConflict`] when the backend asks the caller
    /// to retry, otherwise [`StoreError::Timeout`] / [`StoreError::Backend`].
    async fn increment_clicks(&self, token: &str) -> Result<Option<i64>, StoreError>;
}
