//! DTOs for the analytics endpoint.

use serde::Serialize;

/// Click count for a single shortened URL.
#[derive(Debug, Serialize)]
pub struct ClicksResponse {
    pub clicks: i64,
}
