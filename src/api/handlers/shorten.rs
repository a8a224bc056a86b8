//! Handler for the URL shortening endpoint.

use axum::{Json, extract::State};
use validator::Validate;

use crate::api::dto::shorten::{ShortenRequest, ShortenResponse};
use crate::error::AppError;
use crate::state::AppState;

/// Creates (or returns the existing) short URL for a long URL.
///
/// # Endpoint
///
/// `POST /shorten`
///
/// Shortening is idempotent: repeating a request with the same `longUrl`
/// returns the token minted the first time.
///
/// # Request Body
///
/// ```json
/// { "longUrl": "https://example.com/some/long/path" }
/// ```
///
/// # Response
///
/// ```json
/// { "shortUrl": "http://localhost:3000/a1b2c3d4e5f6" }
/// ```
///
/// # Errors
///
/// - 400 Bad Request if the body is missing `longUrl` or the URL is malformed
/// - 500 if token generation runs out of attempts or the store fails
pub async fn shorten_handler(
    State(state): State<AppState>,
    Json(payload): Json<ShortenRequest>,
) -> Result<Json<ShortenResponse>, AppError> {
    payload.validate()?;

    let token = state.shortener.shorten(&payload.long_url).await?;

    Ok(Json(ShortenResponse {
        short_url: state.shortener.short_url(&token),
    }))
}
