//! Listings file source.

use std::path::PathBuf;

use async_trait::async_trait;
use islestay_auth::SessionContext;
use islestay_listing::prelude::*;

/// Reads stay records from a JSON file.
///
/// Accepts a bare array or an object with a `stays` array.
pub struct JsonFileSource {
    path: PathBuf,
    require_auth: bool,
}

impl JsonFileSource {
    /// Create a source for a file.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            require_auth: false,
        }
    }

    /// Refuse anonymous sessions.
    pub fn require_auth(mut self, required: bool) -> Self {
        self.require_auth = required;
        self
    }
}

#[async_trait]
impl StaySource for JsonFileSource {
    async fn fetch(&self, session: &dyn SessionContext) -> Result<Vec<Stay>, ListingError> {
        if self.require_auth && !session.is_authenticated() {
            return Err(ListingError::Unauthorized);
        }

        tracing::debug!(path = %self.path.display(), "reading listings file");
        let payload = tokio::fs::read_to_string(&self.path).await.map_err(|e| {
            ListingError::SourceUnavailable(format!("{}: {}", self.path.display(), e))
        })?;

        parse_stays(&payload)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use islestay_auth::{AnonymousSession, AuthToken, TokenSession};

    fn write_fixture(name: &str, content: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!("islestay-{}-{}.json", name, std::process::id()));
        std::fs::write(&path, content).unwrap();
        path
    }

    #[tokio::test]
    async fn test_reads_wrapped_stays() {
        let path = write_fixture(
            "wrapped",
            r#"{"stays": [{"_id": "a", "price": 120, "type": "Hotel"}]}"#,
        );
        let stays = JsonFileSource::new(&path).fetch(&AnonymousSession).await.unwrap();
        assert_eq!(stays.len(), 1);
        assert_eq!(stays[0].id.as_str(), "a");
        std::fs::remove_file(path).ok();
    }

    #[tokio::test]
    async fn test_missing_file_is_unavailable() {
        let source = JsonFileSource::new("/nonexistent/islestay/stays.json");
        let err = source.fetch(&AnonymousSession).await.unwrap_err();
        assert!(matches!(err, ListingError::SourceUnavailable(_)));
    }

    #[tokio::test]
    async fn test_require_auth() {
        let path = write_fixture("auth", r#"[{"_id": "b", "price": 80, "type": "Villa"}]"#);
        let source = JsonFileSource::new(&path).require_auth(true);

        let err = source.fetch(&AnonymousSession).await.unwrap_err();
        assert_eq!(err, ListingError::Unauthorized);

        let session = TokenSession::new(AuthToken::new("vendor"));
        assert_eq!(source.fetch(&session).await.unwrap().len(), 1);
        std::fs::remove_file(path).ok();
    }

    #[tokio::test]
    async fn test_malformed_payload_is_decode_error() {
        let path = write_fixture("bad", r#"{"stays": 12}"#);
        let err = JsonFileSource::new(&path)
            .fetch(&AnonymousSession)
            .await
            .unwrap_err();
        assert!(matches!(err, ListingError::Decode(_)));
        std::fs::remove_file(path).ok();
    }
}
