use thiserror::Error;

/// Errors raised while issuing or checking tokens.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("validation failed: {0}")]
    Validation(String),
    #[error("unauthorized access")]
    Unauthorized,
    #[error("token error: {0}")]
    TokenError(String),
}
