//! Handler for click analytics.

use axum::{
    Json,
    extract::{Path, State},
};

use crate::api::dto::clicks::ClicksResponse;
use crate::error::AppError;
use crate::state::AppState;

/// Returns the click count for a shortened URL.
///
/// # Endpoint
///
/// `GET /analytics/{token}`
///
/// # Response
///
/// ```json
/// { "clicks": 42 }
/// ```
///
/// # Errors
///
/// Returns 404 Not Found if the token is unknown.
pub async fn analytics_handler(
    Path(token): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<ClicksResponse>, AppError> {
    let clicks = state.analytics.clicks(&token).await?;

    Ok(Json(ClicksResponse { clicks }))
}
