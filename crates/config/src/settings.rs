//! Runtime settings
//!
//! Settings are assembled from three layers, later layers winning:
//! built-in defaults, an optional TOML file, and `ASSISTANT_`-prefixed
//! environment variables (`ASSISTANT_BACKEND__BASE_URL=... `).

use std::path::Path;
use std::time::Duration;

use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};

use assistant_core::Language;

use crate::ConfigError;

/// Query/translation backend transport settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackendConfig {
    /// Base URL all three endpoints hang off
    pub base_url: String,
    /// Per-request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:5000".to_string(),
            timeout_secs: 30,
        }
    }
}

impl BackendConfig {
    /// Request timeout as a [`Duration`]
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// Language defaults
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LanguageConfig {
    /// Initial selection before the user picks one
    pub default_code: String,
}

impl Default for LanguageConfig {
    fn default() -> Self {
        Self {
            default_code: "en".to_string(),
        }
    }
}

/// Speech output settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpeechConfig {
    /// Whether answers are spoken at all
    pub enabled: bool,
}

impl Default for SpeechConfig {
    fn default() -> Self {
        Self { enabled: true }
    }
}

/// Complete client settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub backend: BackendConfig,
    pub language: LanguageConfig,
    pub speech: SpeechConfig,
}

impl Settings {
    /// The configured initial language selection
    pub fn default_language(&self) -> Language {
        Language::new(&self.language.default_code)
    }
}

/// Load settings from defaults, an optional TOML file, and the environment
pub fn load_settings(file: Option<&Path>) -> Result<Settings, ConfigError> {
    let mut builder = Config::builder().add_source(Config::try_from(&Settings::default())?);

    if let Some(path) = file {
        if !path.exists() {
            return Err(ConfigError::FileNotFound(path.display().to_string()));
        }
        builder = builder.add_source(File::from(path));
    } else {
        // Conventional location, silently skipped when absent
        builder = builder.add_source(File::with_name("assistant").required(false));
    }

    let settings: Settings = builder
        .add_source(Environment::with_prefix("ASSISTANT").separator("__"))
        .build()?
        .try_deserialize()?;

    tracing::debug!(
        base_url = %settings.backend.base_url,
        default_lang = %settings.language.default_code,
        speech = settings.speech.enabled,
        "Settings loaded"
    );

    Ok(settings)
}
