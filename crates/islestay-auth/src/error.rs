//! Authentication errors.

use thiserror::Error;

/// Authentication error type.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum AuthError {
    /// No token was available from the named source.
    #[error("no session token found in {0}")]
    MissingToken(String),

    /// Token expired.
    #[error("token expired")]
    TokenExpired,

    /// Token is present but empty or malformed.
    #[error("token invalid")]
    InvalidToken,
}

impl AuthError {
    /// Check if this is an authentication failure.
    pub fn is_auth_failure(&self) -> bool {
        matches!(self, AuthError::TokenExpired | AuthError::InvalidToken)
    }
}
