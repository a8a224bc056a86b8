//! Syntactic validation of long URLs.
//!
//! Accepted URLs are stored byte-for-byte as submitted; this module only
//! decides whether a string is well-formed enough to shorten. There is no
//! normalization, no reachability check and no scheme allowlist.

use url::Url;

/// Errors that can occur during URL validation.
#[derive(Debug, thiserror::Error)]
pub enum UrlCheckError {
    #[error("Invalid URL format: {0}")]
    Malformed(String),

    #[error("URL must include a scheme and an authority")]
    MissingAuthority,
}

/// Checks that `input` parses as an absolute URL with an authority.
///
/// Schemes without an authority component (`mailto:`, `data:`,
/// `javascript:`) are rejected, as are URLs with an empty host.
///
/// # Errors
///
/// Returns [`UrlCheckError::Malformed`] when the string is not parseable
/// as a URL, [`UrlCheckError::MissingAuthority`] when it parses but
/// carries no host.
pub fn ensure_well_formed(input: &str) -> Result<(), UrlCheckError> {
    let url = Url::parse(input).map_err(|e| UrlCheckError::Malformed(e.to_string()))?;

    if !url.has_authority() || url.host_str().is_none_or(str::is_empty) {
        return Err(UrlCheckError::MissingAuthority);
    }

    Ok(())
}
