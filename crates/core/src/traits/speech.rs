//! Speech output trait

use async_trait::async_trait;

use crate::error::SpeechError;
use crate::language::Language;
use crate::submission::{AudioPayload, SubmissionResult};

/// The two mutually exclusive sources of audible output
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChannelKind {
    /// Playback of an audio blob the backend synthesized
    RemoteAudio,
    /// Synthesis of the answer text on the client
    LocalSynthesis,
}

impl std::fmt::Display for ChannelKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::RemoteAudio => write!(f, "remote audio"),
            Self::LocalSynthesis => write!(f, "local synthesis"),
        }
    }
}

/// What a speech channel is asked to make audible
#[derive(Debug, Clone)]
pub enum SpeechRequest {
    /// Play a backend-synthesized audio payload
    RemoteAudio(AudioPayload),
    /// Synthesize text locally
    Synthesize { text: String, lang: Language },
}

impl SpeechRequest {
    /// The channel this request belongs on
    pub fn channel(&self) -> ChannelKind {
        match self {
            Self::RemoteAudio(_) => ChannelKind::RemoteAudio,
            Self::Synthesize { .. } => ChannelKind::LocalSynthesis,
        }
    }

    /// Select the channel for a published result: remote audio when the
    /// backend supplied it, local synthesis of the answer text otherwise.
    pub fn for_result(result: &SubmissionResult, lang: &Language) -> Self {
        match &result.audio_payload {
            Some(payload) => Self::RemoteAudio(payload.clone()),
            None => Self::Synthesize {
                text: result.answer_text.clone(),
                lang: lang.clone(),
            },
        }
    }
}

/// A single spoken-output channel
///
/// Implementations:
/// - `RemoteAudioPlayback` - plays decoded backend audio through a sink
/// - `LocalSynthesis` - hands text to a synthesizer sink
///
/// Only one channel may be audible at any instant; the `SpeechController`
/// enforces that by stopping the sibling channel before starting a new one.
#[async_trait]
pub trait SpeechOutput: Send + Sync + 'static {
    /// Begin producing sound for `request`
    async fn start(&self, request: &SpeechRequest) -> Result<(), SpeechError>;

    /// Cancel whatever this channel is producing; idempotent
    async fn stop(&self);

    /// Whether this channel is currently producing sound
    fn is_active(&self) -> bool;

    /// Which channel this output implements
    fn channel(&self) -> ChannelKind;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_channel_selection() {
        let with_audio = SubmissionResult {
            answer_text: "hello".into(),
            audio_payload: Some(AudioPayload::new("aGVsbG8=")),
        };
        let text_only = SubmissionResult {
            answer_text: "hello".into(),
            audio_payload: None,
        };
        let lang = Language::english();

        let remote = SpeechRequest::for_result(&with_audio, &lang);
        assert_eq!(remote.channel(), ChannelKind::RemoteAudio);

        let local = SpeechRequest::for_result(&text_only, &lang);
        assert_eq!(local.channel(), ChannelKind::LocalSynthesis);
        match local {
            SpeechRequest::Synthesize { text, .. } => assert_eq!(text, "hello"),
            _ => panic!("expected synthesis request"),
        }
    }

    #[test]
    fn test_channel_display() {
        assert_eq!(ChannelKind::RemoteAudio.to_string(), "remote audio");
        assert_eq!(ChannelKind::LocalSynthesis.to_string(), "local synthesis");
    }
}
