//! Listing engine error types.

use thiserror::Error;

/// Errors surfaced by the listing engine.
///
/// Pricing and matching never fail; these cover the listings source and
/// engine configuration.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ListingError {
    /// The external listings source failed.
    #[error("Listings source unavailable: {0}")]
    SourceUnavailable(String),

    /// The listings source requires an authenticated session.
    #[error("Listings source requires an authenticated session")]
    Unauthorized,

    /// Stay records could not be decoded.
    #[error("Failed to decode stay records: {0}")]
    Decode(String),

    /// Engine configuration is unusable.
    #[error("Invalid engine configuration: {0}")]
    InvalidConfig(String),
}

impl From<serde_json::Error> for ListingError {
    fn from(e: serde_json::Error) -> Self {
        ListingError::Decode(e.to_string())
    }
}
