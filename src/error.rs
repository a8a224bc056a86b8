use std::time::Duration;

use axum::{
    Json,
    http::{HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
};
use serde::Serialize;
use serde_json::{Value, json};

use crate::domain::repositories::StoreError;

#[derive(Serialize)]
struct ErrorBody {
    error: ErrorInfo,
}

#[derive(Serialize)]
struct ErrorInfo {
    code: &'static str,
    message: String,
    details: Value,
}

/// Application error taxonomy.
///
/// Every operation failure is one of these kinds; mapping to HTTP status
/// codes happens only in [`IntoResponse`]. Client-facing `details` never
/// carry backend internals, those stay in the logs.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("{message}")]
    InvalidInput { message: String, details: Value },

    #[error("{message}")]
    NotFound { message: String, details: Value },

    #[error("{message}")]
    RateLimited {
        message: String,
        details: Value,
        retry_after: Duration,
    },

    #[error("{message}")]
    GenerationExhausted { message: String, details: Value },

    #[error("{message}")]
    Store { message: String, details: Value },
}

impl AppError {
    pub fn invalid_input(message: impl Into<String>, details: Value) -> Self {
        Self::InvalidInput {
            message: message.into(),
            details,
        }
    }

    pub fn not_found(message: impl Into<String>, details: Value) -> Self {
        Self::NotFound {
            message: message.into(),
            details,
        }
    }

    pub fn rate_limited(message: impl Into<String>, details: Value, retry_after: Duration) -> Self {
        Self::RateLimited {
            message: message.into(),
            details,
            retry_after,
        }
    }

    pub fn generation_exhausted(message: impl Into<String>, details: Value) -> Self {
        Self::GenerationExhausted {
            message: message.into(),
            details,
        }
    }

    pub fn store(message: impl Into<String>, details: Value) -> Self {
        Self::Store {
            message: message.into(),
            details,
        }
    }

    /// Converts a repository failure into a client-safe [`AppError::Store`],
    /// logging the full error with its operation context first.
    pub fn from_store(operation: &'static str, context: Value, err: StoreError) -> Self {
        tracing::error!(operation, context = %context, error = %err, "store operation failed");

        Self::store(
            "Store operation failed",
            json!({ "operation": operation }),
        )
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let details = serde_json::to_value(&errors).unwrap_or_else(|_| json!({}));
        Self::invalid_input("Invalid request body", details)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message, details, retry_after) = match self {
            AppError::InvalidInput { message, details } => (
                StatusCode::BAD_REQUEST,
                "invalid_input",
                message,
                details,
                None,
            ),
            AppError::NotFound { message, details } => {
                (StatusCode::NOT_FOUND, "not_found", message, details, None)
            }
            AppError::RateLimited {
                message,
                details,
                retry_after,
            } => (
                StatusCode::TOO_MANY_REQUESTS,
                "rate_limited",
                message,
                details,
                Some(retry_after),
            ),
            AppError::GenerationExhausted { message, details } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "generation_exhausted",
                message,
                details,
                None,
            ),
            AppError::Store { message, details } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "store_error",
                message,
                details,
                None,
            ),
        };

        let body = ErrorBody {
            error: ErrorInfo {
                code,
                message,
                details,
            },
        };

        let mut response = (status, Json(body)).into_response();

        if let Some(retry_after) = retry_after {
            let secs = (retry_after.as_millis().div_ceil(1000) as u64).max(1);
            response
                .headers_mut()
                .insert(header::RETRY_AFTER, HeaderValue::from(secs));
        }

        response
    }
}
