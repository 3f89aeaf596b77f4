//! Submission request and result types
//!
//! One submission is one run of the pipeline: translate-in → query →
//! translate-out → speak. The audio payload travels inside the result, from
//! the query backend straight to the speech layer, never through ambient
//! shared state.

use serde::{Deserialize, Serialize};

use crate::language::Language;
use crate::session::SessionId;

/// Opaque binary-as-text audio blob, as received from the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AudioPayload(String);

impl AudioPayload {
    /// Wrap an already-encoded blob
    pub fn new(encoded: impl Into<String>) -> Self {
        Self(encoded.into())
    }

    /// The encoded text form
    pub fn as_encoded(&self) -> &str {
        &self.0
    }

    /// Decode to raw bytes for playback
    pub fn decode(&self) -> Result<Vec<u8>, base64::DecodeError> {
        use base64::Engine;
        base64::engine::general_purpose::STANDARD.decode(&self.0)
    }
}

/// Everything a single user submit carries into the pipeline
#[derive(Debug, Clone)]
pub struct SubmissionRequest {
    /// Free text exactly as entered
    pub raw_text: String,
    /// Language selection at submit time
    pub lang: Language,
    /// Session correlating this submission to the client instance
    pub session: SessionId,
}

/// The published outcome of one successful pipeline run.
///
/// Held as the current answer until replaced by the next successful run or
/// cleared by the next submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmissionResult {
    /// Final user-facing answer text (already translated back if needed)
    pub answer_text: String,
    /// Remote audio for the answer, when the backend produced one
    pub audio_payload: Option<AudioPayload>,
}

impl SubmissionResult {
    /// Whether the backend supplied remote audio for this answer
    pub fn has_audio(&self) -> bool {
        self.audio_payload.is_some()
    }
}
