//! Access token generation.
//!
//! Raw tokens are shown once at account creation and never stored; only
//! their HMAC is persisted.

use crate::error::AppError;
use base64::Engine as _;
use serde_json::json;

/// Random bytes per token before base64 encoding.
const TOKEN_LENGTH_BYTES: usize = 32;

/// Prefix that makes portal tokens easy to spot in logs and secret scanners.
pub const TOKEN_PREFIX: &str = "adm_";

/// Generates a cryptographically secure random access token.
///
/// Uses `getrandom` for entropy and URL-safe base64 without padding, giving
/// a 43-character body after [`TOKEN_PREFIX`].
///
/// # Errors
///
/// Returns [`AppError::Internal`] if the system random number generator fails.
pub fn generate_token() -> Result<String, AppError> {
    let mut buffer = [0u8; TOKEN_LENGTH_BYTES];

    getrandom::fill(&mut buffer).map_err(|e| {
        AppError::internal(
            "Failed to generate access token",
            json!({ "reason": e.to_string() }),
        )
    })?;

    Ok(format!(
        "{TOKEN_PREFIX}{}",
        base64::engine::general_purpose::URL_SAFE_NO_PAD.encode(buffer)
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_generate_token_shape() {
        let token = generate_token().unwrap();
        assert!(token.starts_with(TOKEN_PREFIX));
        assert_eq!(token.len(), TOKEN_PREFIX.len() + 43);
        assert!(
            token[TOKEN_PREFIX.len()..]
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
        );
    }

    #[test]
    fn test_generate_token_uniqueness() {
        let tokens: HashSet<String> = (0..200).map(|_| generate_token().unwrap()).collect();
        assert_eq!(tokens.len(), 200);
    }
}
