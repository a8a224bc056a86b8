//! Token resolution with click recording.

use std::sync::Arc;

use serde_json::json;
use tokio_retry::RetryIf;
use tokio_retry::strategy::FixedInterval;

use crate::domain::repositories::{StoreError, UrlRepository};
use crate::error::AppError;
use crate::utils::token_generator::looks_like_token;

/// Extra attempts when the store reports a write conflict on the counter.
const INCREMENT_RETRIES: usize = 2;

/// Delay between counter retry attempts.
const INCREMENT_RETRY_DELAY_MS: u64 = 25;

/// Service resolving short tokens back to their long URLs.
///
/// Every successful resolution records exactly one click before the URL is
/// handed back, so a redirect is never issued for an uncounted visit.
pub struct RedirectService {
    repository: Arc<dyn UrlRepository>,
}

impl RedirectService {
    pub fn new(repository: Arc<dyn UrlRepository>) -> Self {
        Self { repository }
    }

    /// Resolves `token` to the long URL it was created with, unchanged.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] for an unknown token and
    /// [`AppError::Store`] when the lookup or the click increment fails;
    /// in the latter case no URL is returned even though the record exists.
    pub async fn resolve(&self, token: &str) -> Result<String, AppError> {
        if !looks_like_token(token) {
            return Err(Self::unknown_token(token));
        }

        let record = self
            .repository
            .find_by_token(token)
            .await
            .map_err(|e| AppError::from_store("find_by_token", json!({ "token": token }), e))?
            .ok_or_else(|| Self::unknown_token(token))?;

        let strategy = FixedInterval::from_millis(INCREMENT_RETRY_DELAY_MS).take(INCREMENT_RETRIES);
        let updated = RetryIf::spawn(
            strategy,
            || self.repository.increment_clicks(token),
            |e: &StoreError| matches!(e, StoreError::WriteConflict),
        )
        .await
        .map_err(|e| AppError::from_store("increment_clicks", json!({ "token": token }), e))?;

        match updated {
            Some(clicks) => {
                tracing::debug!(token, clicks, "recorded click");
                Ok(record.long_url)
            }
            // Records are never deleted, so this should not happen; treat
            // it as the token not existing rather than redirect uncounted.
            None => Err(Self::unknown_token(token)),
        }
    }

    fn unknown_token(token: &str) -> AppError {
        AppError::not_found("Shortened URL not found", json!({ "token": token }))
    }
}
