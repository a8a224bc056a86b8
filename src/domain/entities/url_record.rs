//! UrlRecord entity representing a shortened URL mapping.

/// A stored mapping between a long URL and its short token.
///
/// Exactly three fields are persisted. Records are never deleted and,
/// apart from `click_count`, never mutated after insert. There is at most
/// one record per byte-equal `long_url`, and `short_token` is unique.
#[derive(Debug, Clone)]
pub struct UrlRecord {
    pub long_url: String,
    pub short_token: String,
    pub click_count: i64,
}

impl UrlRecord {
    /// Creates a fresh record with a zero click count.
    pub fn new(long_url: impl Into<String>, short_token: impl Into<String>) -> Self {
        Self {
            long_url: long_url.into(),
            short_token: short_token.into(),
            click_count: 0,
        }
    }
}
