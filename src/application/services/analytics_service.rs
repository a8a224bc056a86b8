//! Click analytics lookups.

use std::sync::Arc;

use serde_json::json;

use crate::domain::repositories::UrlRepository;
use crate::error::AppError;
use crate::utils::token_generator::looks_like_token;

/// Read-only service exposing the click counter of a short link.
pub struct AnalyticsService {
    repository: Arc<dyn UrlRepository>,
}

impl AnalyticsService {
    pub fn new(repository: Arc<dyn UrlRepository>) -> Self {
        Self { repository }
    }

    /// Returns the number of recorded clicks for `token`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] for an unknown token,
    /// [`AppError::Store`] on store failures.
    pub async fn clicks(&self, token: &str) -> Result<i64, AppError> {
        if !looks_like_token(token) {
            return Err(Self::unknown_token(token));
        }

        self.repository
            .find_by_token(token)
            .await
            .map_err(|e| AppError::from_store("find_by_token", json!({ "token": token }), e))?
            .map(|record| record.click_count)
            .ok_or_else(|| Self::unknown_token(token))
    }

    fn unknown_token(token: &str) -> AppError {
        AppError::not_found("URL not found", json!({ "token": token }))
    }
}
