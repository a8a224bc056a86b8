//! URL shortening service with get-or-create semantics.

use std::sync::Arc;

use serde_json::json;

use crate::domain::entities::UrlRecord;
use crate::domain::repositories::{StoreError, UrlRepository};
use crate::error::AppError;
use crate::utils::token_generator::generate_token;
use crate::utils::url_check::ensure_well_formed;

/// Candidate tokens tried per shorten call before giving up.
const MAX_TOKEN_ATTEMPTS: usize = 5;

/// Service for mapping long URLs to short tokens.
///
/// Shortening is idempotent: a long URL is mapped at most once, byte-equal
/// inputs always yield the same token, and concurrent calls for a fresh
/// URL converge on a single record.
pub struct ShortenerService {
    repository: Arc<dyn UrlRepository>,
    base_url: String,
}

impl ShortenerService {
    /// Creates a new shortener service rendering short URLs under `base_url`.
    pub fn new(repository: Arc<dyn UrlRepository>, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            repository,
            base_url,
        }
    }

    /// Returns the short token for `long_url`, creating a record if none exists.
    ///
    /// The input is stored byte-for-byte; only syntactic well-formedness is
    /// checked (parseable, scheme and authority present).
    ///
    /// # Errors
    ///
    /// Returns [`AppError::InvalidInput`] for a malformed URL (nothing is
    /// stored), [`AppError::GenerationExhausted`] when every candidate token
    /// collided, [`AppError::Store`] on store failures.
    pub async fn shorten(&self, long_url: &str) -> Result<String, AppError> {
        ensure_well_formed(long_url).map_err(|e| {
            AppError::invalid_input("Invalid URL", json!({ "reason": e.to_string() }))
        })?;

        if let Some(existing) = self
            .repository
            .find_by_long_url(long_url)
            .await
            .map_err(|e| AppError::from_store("find_by_long_url", json!({ "longUrl": long_url }), e))?
        {
            return Ok(existing.short_token);
        }

        for attempt in 1..=MAX_TOKEN_ATTEMPTS {
            let token = generate_token();

            match self
                .repository
                .insert(UrlRecord::new(long_url, &token))
                .await
            {
                Ok(()) => {
                    tracing::debug!(token, "created short link");
                    return Ok(token);
                }
                Err(StoreError::DuplicateToken) => {
                    tracing::warn!(attempt, "token collision, trying a fresh candidate");
                }
                Err(StoreError::DuplicateLongUrl) => {
                    // Lost the get-or-create race; the winning record is
                    // authoritative.
                    return self.winning_token(long_url).await;
                }
                Err(e) => {
                    return Err(AppError::from_store(
                        "insert",
                        json!({ "longUrl": long_url }),
                        e,
                    ));
                }
            }
        }

        Err(AppError::generation_exhausted(
            "Failed to generate a unique token",
            json!({ "attempts": MAX_TOKEN_ATTEMPTS }),
        ))
    }

    /// Renders the public short URL for a token.
    pub fn short_url(&self, token: &str) -> String {
        format!("{}/{}", self.base_url, token)
    }

    async fn winning_token(&self, long_url: &str) -> Result<String, AppError> {
        let record = self
            .repository
            .find_by_long_url(long_url)
            .await
            .map_err(|e| {
                AppError::from_store("find_by_long_url", json!({ "longUrl": long_url }), e)
            })?;

        record.map(|r| r.short_token).ok_or_else(|| {
            AppError::store(
                "Mapping vanished after a duplicate-URL conflict",
                json!({ "longUrl": long_url }),
            )
        })
    }
}
