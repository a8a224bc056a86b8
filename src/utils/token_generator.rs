//! Short token generation and syntax checking.
//!
//! Provides cryptographically secure random token generation for short
//! links, plus a cheap syntax predicate for incoming path segments.

/// Entropy drawn per token, before hex encoding.
const TOKEN_ENTROPY_BYTES: usize = 6;

/// Length of an issued token in characters.
pub const TOKEN_LEN: usize = TOKEN_ENTROPY_BYTES * 2;

/// Generates a cryptographically secure random short token.
///
/// Uses `getrandom` for entropy and encodes the result as lowercase
/// hexadecimal, producing a 12-character token.
///
/// # Panics
///
/// Panics if the system random number generator fails (extremely rare).
/// Entropy failure is not a recoverable condition and is never retried.
///
/// # Examples
///
/// ```ignore
/// let token = generate_token();
/// assert_eq!(token.len(), 12);
/// assert!(token.chars().all(|c| c.is_ascii_hexdigit()));
/// ```
pub fn generate_token() -> String {
    let mut buffer = [0u8; TOKEN_ENTROPY_BYTES];

    getrandom::fill(&mut buffer).expect("Failed to generate random bytes");

    hex::encode(buffer)
}

/// Returns true if `candidate` has the shape of an issued token.
///
/// Issued tokens are always [`TOKEN_LEN`] lowercase hex characters, so
/// anything else (favicon requests, probing paths) can be answered as
/// not-found without a store lookup.
pub fn looks_like_token(candidate: &str) -> bool {
    candidate.len() == TOKEN_LEN
        && candidate
            .bytes()
            .all(|b| matches!(b, b'0'..=b'9' | b'a'..=b'f'))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_generate_token_not_empty() {
        let token = generate_token();
        assert!(!token.is_empty());
    }

    #[test]
    fn test_generate_token_has_correct_length() {
        let token = generate_token();
        assert_eq!(token.len(), TOKEN_LEN);
    }

    #[test]
    fn test_generate_token_lowercase_hex_only() {
        let token = generate_token();
        assert!(
            token
                .bytes()
                .all(|b| matches!(b, b'0'..=b'9' | b'a'..=b'f'))
        );
    }

    #[test]
    fn test_generate_token_produces_unique_tokens() {
        let mut tokens = HashSet::new();

        for _ in 0..1000 {
            let token = generate_token();
            tokens.insert(token);
        }

        assert_eq!(tokens.len(), 1000);
    }

    #[test]
    fn test_generated_tokens_pass_syntax_check() {
        for _ in 0..100 {
            assert!(looks_like_token(&generate_token()));
        }
    }

    #[test]
    fn test_looks_like_token_rejects_wrong_length() {
        assert!(!looks_like_token(""));
        assert!(!looks_like_token("a1b2c3"));
        assert!(!looks_like_token("a1b2c3d4e5f6a1"));
    }

    #[test]
    fn test_looks_like_token_rejects_non_hex() {
        assert!(!looks_like_token("a1b2c3d4e5fg"));
        assert!(!looks_like_token("A1B2C3D4E5F6"));
        assert!(!looks_like_token("favicon.ico"));
    }

    #[test]
    fn test_looks_like_token_accepts_valid_shape() {
        assert!(looks_like_token("a1b2c3d4e5f6"));
        assert!(looks_like_token("000000000000"));
        assert!(looks_like_token("ffffffffffff"));
    }
}
