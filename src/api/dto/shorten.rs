//! DTOs for the shorten endpoint.

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Request to shorten a single URL.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ShortenRequest {
    /// The original URL to shorten. Well-formedness is checked by the
    /// shortening service, only presence is validated here.
    #[validate(length(min = 1, message = "longUrl must not be empty"))]
    pub long_url: String,
}

/// Response carrying the fully qualified short URL.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ShortenResponse {
    pub short_url: String,
}
