//! Remote translation wrapper
//!
//! Best-effort: every failure (transport, non-success status, missing
//! `translated_text` field) degrades to the original text. A translation
//! problem never aborts the pipeline and never reaches the user.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::warn;

use assistant_core::{Language, Translator};

use crate::endpoint_url;

#[derive(Error, Debug)]
enum TranslateFailure {
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("missing `translated_text` field")]
    MissingField,
}

/// Wire shape of `POST /translate`
#[derive(Debug, Serialize)]
struct TranslateRequest<'a> {
    text: &'a str,
    dest: &'a str,
}

#[derive(Debug, Deserialize)]
struct TranslateResponse {
    translated_text: Option<String>,
}

/// Stateless client for the remote translation capability
#[derive(Clone)]
pub struct HttpTranslator {
    client: reqwest::Client,
    base_url: String,
}

impl HttpTranslator {
    /// Create a translator bound to a backend base URL
    pub fn new(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
        }
    }

    async fn request_translation(
        &self,
        text: &str,
        dest: &str,
    ) -> Result<String, TranslateFailure> {
        let response = self
            .client
            .post(endpoint_url(&self.base_url, "translate"))
            .json(&TranslateRequest { text, dest })
            .send()
            .await?
            .error_for_status()?;

        let body: TranslateResponse = response
            .json()
            .await
            .map_err(|_| TranslateFailure::MissingField)?;

        body.translated_text.ok_or(TranslateFailure::MissingField)
    }
}

#[async_trait]
impl Translator for HttpTranslator {
    async fn translate(&self, text: &str, dest: &Language) -> String {
        match self.request_translation(text, dest.code()).await {
            Ok(translated) => translated,
            Err(reason) => {
                warn!(%reason, dest = %dest, "Translation failed, using original text");
                text.to_string()
            }
        }
    }

    fn name(&self) -> &str {
        "http"
    }
}
