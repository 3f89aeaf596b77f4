//! Query backend wrapper
//!
//! The only remote call whose failure is user-visible. A non-success status
//! surfaces the server's own message when the body carries one; a request
//! that never completes surfaces the generic network-error message. Both
//! are terminal for the submission.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use assistant_core::{
    AudioPayload, Language, QueryAnswer, QueryBackend, QueryError, SessionId,
};

use crate::endpoint_url;

/// Wire shape of `POST /query`
#[derive(Debug, Serialize)]
struct QueryRequest<'a> {
    query: &'a str,
    user_id: &'a str,
    lang: &'a str,
}

#[derive(Debug, Deserialize)]
struct QuerySuccessBody {
    answer: String,
    #[serde(default)]
    audio_base64: Option<String>,
}

#[derive(Debug, Deserialize)]
struct QueryFailureBody {
    #[serde(default)]
    error: Option<String>,
}

/// Stateless client for the remote assistant capability
#[derive(Clone)]
pub struct HttpQueryClient {
    client: reqwest::Client,
    base_url: String,
}

impl HttpQueryClient {
    /// Create a query client bound to a backend base URL
    pub fn new(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
        }
    }
}

#[async_trait]
impl QueryBackend for HttpQueryClient {
    async fn query(
        &self,
        text: &str,
        session: &SessionId,
        lang: &Language,
    ) -> Result<QueryAnswer, QueryError> {
        let request = QueryRequest {
            query: text,
            user_id: session.as_str(),
            lang: lang.code(),
        };

        let response = self
            .client
            .post(endpoint_url(&self.base_url, "query"))
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                warn!(error = %e, "Query request never completed");
                QueryError::Unreachable
            })?;

        let status = response.status();
        if status.is_success() {
            // An unreadable success body counts as the request never
            // completing: the caller gets the generic network error.
            let body: QuerySuccessBody = response.json().await.map_err(|e| {
                warn!(error = %e, "Query response body undecodable");
                QueryError::Unreachable
            })?;
            Ok(QueryAnswer {
                answer_text: body.answer,
                audio_payload: body.audio_base64.map(AudioPayload::new),
            })
        } else {
            let message = response
                .json::<QueryFailureBody>()
                .await
                .ok()
                .and_then(|body| body.error);
            debug!(%status, "Query rejected by backend");
            Err(QueryError::server_rejected(message))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_unreachable_backend_is_network_error() {
        let client = HttpQueryClient::new(reqwest::Client::new(), "http://127.0.0.1:1");
        let err = client
            .query("hi", &SessionId::generate(), &Language::english())
            .await
            .unwrap_err();
        assert_eq!(err, QueryError::Unreachable);
        assert_eq!(err.to_string(), "Network error");
    }

    #[test]
    fn test_request_wire_shape() {
        let session = SessionId::generate();
        let request = QueryRequest {
            query: "hello",
            user_id: session.as_str(),
            lang: "fr",
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["query"], "hello");
        assert_eq!(json["user_id"], session.as_str());
        assert_eq!(json["lang"], "fr");
    }

    #[test]
    fn test_success_body_without_audio() {
        let body: QuerySuccessBody = serde_json::from_str(r#"{"answer":"hello"}"#).unwrap();
        assert_eq!(body.answer, "hello");
        assert!(body.audio_base64.is_none());
    }

    #[test]
    fn test_success_body_with_audio() {
        let body: QuerySuccessBody =
            serde_json::from_str(r#"{"answer":"hello","audio_base64":"aGVsbG8="}"#).unwrap();
        assert_eq!(body.audio_base64.as_deref(), Some("aGVsbG8="));
    }

    #[test]
    fn test_failure_body_message_optional() {
        let with: QueryFailureBody = serde_json::from_str(r#"{"error":"overloaded"}"#).unwrap();
        assert_eq!(with.error.as_deref(), Some("overloaded"));

        let without: QueryFailureBody = serde_json::from_str(r#"{}"#).unwrap();
        assert!(without.error.is_none());
    }
}
