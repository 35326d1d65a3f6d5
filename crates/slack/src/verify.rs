//! Shared-secret verification of inbound webhooks.

use secrecy::{ExposeSecret, SecretString};
use thiserror::Error;

/// Credential failure on an inbound webhook. Both entry points answer 401
/// with the message as the body.
#[derive(Clone, Copy, Debug, Error, PartialEq, Eq)]
pub enum AuthError {
    #[error("Missing token")]
    MissingToken,
    #[error("Invalid token")]
    InvalidToken,
}

/// Compares the request's `token` field against the configured verification
/// secret. An absent or empty field is `MissingToken`; anything else that
/// does not match is `InvalidToken`.
pub fn verify_token(provided: Option<&str>, expected: &SecretString) -> Result<(), AuthError> {
    let provided = provided.filter(|token| !token.is_empty()).ok_or(AuthError::MissingToken)?;
    if provided != expected.expose_secret() {
        return Err(AuthError::InvalidToken);
    }
    Ok(())
}
