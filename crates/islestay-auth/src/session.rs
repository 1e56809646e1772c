//! Session context capability.

use crate::token::AuthToken;
use crate::AuthError;

/// Environment variable read for the session token when none is configured.
pub const DEFAULT_TOKEN_ENV: &str = "ISLESTAY_TOKEN";

/// The caller's session, passed explicitly to anything that needs it.
pub trait SessionContext: Send + Sync {
    /// The bearer token, if the session carries one.
    fn token(&self) -> Option<&str>;

    /// Whether the session is authenticated.
    fn is_authenticated(&self) -> bool;
}

/// A session with no credentials.
#[derive(Debug, Clone, Copy, Default)]
pub struct AnonymousSession;

impl SessionContext for AnonymousSession {
    fn token(&self) -> Option<&str> {
        None
    }

    fn is_authenticated(&self) -> bool {
        false
    }
}

/// A session backed by a bearer token.
#[derive(Debug, Clone)]
pub struct TokenSession {
    token: AuthToken,
}

impl TokenSession {
    /// Create a session from a token.
    pub fn new(token: AuthToken) -> Self {
        Self { token }
    }

    /// Build a session from an environment variable.
    pub fn from_env(var: &str) -> Result<Self, AuthError> {
        match std::env::var(var) {
            Ok(value) if !value.trim().is_empty() => Ok(Self::new(AuthToken::new(value.trim()))),
            _ => Err(AuthError::MissingToken(var.to_string())),
        }
    }

    /// The underlying token.
    pub fn auth_token(&self) -> &AuthToken {
        &self.token
    }
}

impl SessionContext for TokenSession {
    fn token(&self) -> Option<&str> {
        Some(self.token.token.as_str())
    }

    fn is_authenticated(&self) -> bool {
        self.token.validate().is_ok()
    }
}
