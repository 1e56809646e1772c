//! Session context for IsleStay.
//!
//! Components that need the caller's identity receive a [`SessionContext`]
//! explicitly instead of reading ambient storage.

mod error;
mod session;
mod token;

pub use error::AuthError;
pub use session::{AnonymousSession, SessionContext, TokenSession, DEFAULT_TOKEN_ENV};
pub use token::AuthToken;
