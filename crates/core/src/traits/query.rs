//! Query backend trait

use async_trait::async_trait;

use crate::error::QueryError;
use crate::language::Language;
use crate::session::SessionId;
use crate::submission::AudioPayload;

/// A successful backend reply, before any translate-out step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryAnswer {
    /// Answer text in the backend's language (English)
    pub answer_text: String,
    /// Synthesized audio for the answer, when the backend produced one
    pub audio_payload: Option<AudioPayload>,
}

/// The remote assistant capability
///
/// One-shot request/response; failures are terminal for the submission
/// that issued the query (no retries at this seam).
///
/// Implementations:
/// - `HttpQueryClient` - the real backend over HTTP
#[async_trait]
pub trait QueryBackend: Send + Sync + 'static {
    /// Send a query and await the answer
    ///
    /// # Arguments
    /// * `text` - Query text (already in English when translation applies)
    /// * `session` - Session correlating this client instance
    /// * `lang` - The user's language selection, forwarded to the backend
    ///
    /// # Returns
    /// The answer with optional audio, or a terminal [`QueryError`]
    async fn query(
        &self,
        text: &str,
        session: &SessionId,
        lang: &Language,
    ) -> Result<QueryAnswer, QueryError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    struct CannedBackend;

    #[async_trait]
    impl QueryBackend for CannedBackend {
        async fn query(
            &self,
            text: &str,
            _session: &SessionId,
            _lang: &Language,
        ) -> Result<QueryAnswer, QueryError> {
            if text.is_empty() {
                return Err(QueryError::server_rejected(None));
            }
            Ok(QueryAnswer {
                answer_text: format!("echo: {text}"),
                audio_payload: None,
            })
        }
    }

    #[tokio::test]
    async fn test_mock_backend() {
        let backend = CannedBackend;
        let session = SessionId::generate();
        let answer = backend
            .query("hi", &session, &Language::english())
            .await
            .unwrap();
        assert_eq!(answer.answer_text, "echo: hi");
        assert!(answer.audio_payload.is_none());

        let err = backend
            .query("", &session, &Language::english())
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "Something went wrong");
    }
}
