//! Translation trait

use async_trait::async_trait;

use crate::language::Language;

/// Translation interface
///
/// Translation is best-effort by contract: implementations must return the
/// original `text` unchanged when the capability fails, so a translation
/// problem can never abort a pipeline run or surface as a user-facing
/// error. The signature is infallible to make that impossible to get wrong
/// at call sites.
///
/// Implementations:
/// - `HttpTranslator` - remote translation service
/// - `NoopTranslator` - pass-through (tests, translation disabled)
#[async_trait]
pub trait Translator: Send + Sync + 'static {
    /// Translate `text` into `dest`
    ///
    /// # Arguments
    /// * `text` - Text to translate
    /// * `dest` - Destination language
    ///
    /// # Returns
    /// The translated text, or `text` unchanged on any failure
    async fn translate(&self, text: &str, dest: &Language) -> String;

    /// Get translator name for logging
    fn name(&self) -> &str;
}

/// Pass-through translator that does nothing
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopTranslator;

#[async_trait]
impl Translator for NoopTranslator {
    async fn translate(&self, text: &str, _dest: &Language) -> String {
        text.to_string()
    }

    fn name(&self) -> &str {
        "noop"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_noop_passthrough() {
        let translator = NoopTranslator;
        let out = translator.translate("bonjour", &Language::new("en")).await;
        assert_eq!(out, "bonjour");
        assert_eq!(translator.name(), "noop");
    }
}
