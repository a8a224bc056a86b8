//! Handler for short URL redirect.

use axum::{
    extract::{Path, State},
    http::{HeaderValue, StatusCode, header},
    response::IntoResponse,
};
use serde_json::json;
use url::Url;

use crate::error::AppError;
use crate::state::AppState;

/// Redirects a short token to its original URL.
///
/// # Endpoint
///
/// `GET /{token}`
///
/// The click counter is incremented before the redirect is returned, so a
/// successful response is always a counted one.
///
/// # Errors
///
/// Returns 404 Not Found if the token is unknown or not token-shaped.
pub async fn redirect_handler(
    Path(token): Path<String>,
    State(state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let long_url = state.redirector.resolve(&token).await?;

    let location = location_value(&long_url).ok_or_else(|| {
        AppError::store(
            "Stored URL is not a usable redirect target",
            json!({ "token": token }),
        )
    })?;

    Ok((StatusCode::FOUND, [(header::LOCATION, location)]))
}

/// Builds the `Location` header for a stored URL.
///
/// Stored URLs are usually valid header values as-is. The fallback
/// re-parses the URL so non-ASCII parts come back percent-encoded.
fn location_value(raw: &str) -> Option<HeaderValue> {
    if let Ok(value) = HeaderValue::from_str(raw) {
        return Some(value);
    }

    let encoded = Url::parse(raw).ok()?;
    HeaderValue::from_str(encoded.as_str()).ok()
}
