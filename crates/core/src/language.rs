//! Language selection and catalog types
//!
//! The set of supported languages is fetched from the translation service at
//! startup, so language codes are open-ended strings rather than a closed
//! enum. English is the pivot: the backend is queried in English and a
//! selection of "en" skips both translation steps.

use serde::{Deserialize, Serialize};

/// Code of the pivot language understood natively by the query backend.
pub const ENGLISH_CODE: &str = "en";

/// A selected language, identified by its catalog code (e.g. "en", "fr").
///
/// Codes are normalized to trimmed lowercase on construction so that
/// selections compare reliably against catalog entries.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Language(String);

impl Language {
    /// Create a selection from a raw code
    pub fn new(code: impl AsRef<str>) -> Self {
        Self(code.as_ref().trim().to_lowercase())
    }

    /// The default selection (English)
    pub fn english() -> Self {
        Self(ENGLISH_CODE.to_string())
    }

    /// Get the normalized code
    pub fn code(&self) -> &str {
        &self.0
    }

    /// Whether this selection is the English pivot (translation skipped)
    pub fn is_english(&self) -> bool {
        self.0 == ENGLISH_CODE
    }
}

impl Default for Language {
    fn default() -> Self {
        Self::english()
    }
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One supported language as advertised by the translation service
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LanguageEntry {
    /// Selection code
    pub code: String,
    /// Human-readable label
    pub label: String,
}

impl LanguageEntry {
    /// Create a catalog entry
    pub fn new(code: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            label: label.into(),
        }
    }

    /// The selection this entry maps to
    pub fn language(&self) -> Language {
        Language::new(&self.code)
    }
}

/// The single-entry set used whenever the remote catalog cannot be fetched
pub fn fallback_catalog() -> Vec<LanguageEntry> {
    vec![LanguageEntry::new("en", "English")]
}
