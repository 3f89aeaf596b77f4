//! Supported-language catalog
//!
//! Fetched from the translation service once at startup. Any failure
//! (transport, non-success status, malformed body, empty list) degrades to
//! the single-entry English fallback. No retries.

use parking_lot::RwLock;
use serde::Deserialize;
use thiserror::Error;
use tracing::{info, warn};

use assistant_core::{fallback_catalog, Language, LanguageEntry};

use crate::endpoint_url;

#[derive(Error, Debug)]
enum FetchError {
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("malformed response: {0}")]
    Malformed(&'static str),
}

/// Wire shape of `GET /translate-langs`
#[derive(Debug, Deserialize)]
struct LanguagesResponse {
    languages: Option<Vec<LanguageEntry>>,
}

/// Holds the set of supported (code, label) language pairs.
///
/// Starts on the fallback set, so `current()` is non-empty even before
/// `refresh()` has run.
pub struct LanguageCatalog {
    client: reqwest::Client,
    base_url: String,
    entries: RwLock<Vec<LanguageEntry>>,
}

impl LanguageCatalog {
    /// Create a catalog bound to a backend base URL
    pub fn new(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
            entries: RwLock::new(fallback_catalog()),
        }
    }

    /// Fetch the remote language list once, replacing the held set.
    ///
    /// On any failure the held set becomes exactly the English fallback.
    pub async fn refresh(&self) {
        match self.fetch().await {
            Ok(languages) => {
                info!(count = languages.len(), "Language catalog refreshed");
                *self.entries.write() = languages;
            }
            Err(reason) => {
                warn!(%reason, "Language catalog refresh failed, using fallback");
                *self.entries.write() = fallback_catalog();
            }
        }
    }

    async fn fetch(&self) -> Result<Vec<LanguageEntry>, FetchError> {
        let response = self
            .client
            .get(endpoint_url(&self.base_url, "translate-langs"))
            .send()
            .await?
            .error_for_status()?;

        let body: LanguagesResponse = response
            .json()
            .await
            .map_err(|_| FetchError::Malformed("body is not the expected JSON shape"))?;

        let languages = body
            .languages
            .ok_or(FetchError::Malformed("missing `languages` field"))?;
        if languages.is_empty() {
            return Err(FetchError::Malformed("empty `languages` list"));
        }

        Ok(languages)
    }

    /// The held set; non-empty at all times
    pub fn current(&self) -> Vec<LanguageEntry> {
        self.entries.read().clone()
    }

    /// Whether a selection is present in the held set
    pub fn contains(&self, lang: &Language) -> bool {
        self.entries
            .read()
            .iter()
            .any(|entry| entry.language() == *lang)
    }

    /// Label for a selection, when the catalog knows it
    pub fn label_of(&self, lang: &Language) -> Option<String> {
        self.entries
            .read()
            .iter()
            .find(|entry| entry.language() == *lang)
            .map(|entry| entry.label.clone())
    }
}
