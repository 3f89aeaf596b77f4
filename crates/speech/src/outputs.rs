//! Speech channel implementations
//!
//! Each channel drives an injected sink; the device/synthesizer behind the
//! sink is an external collaborator. The channels only track activity and
//! enforce that requests arrive on the right channel. Mixing policy lives
//! in the [`crate::SpeechController`].

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, info};

use assistant_core::{ChannelKind, Language, SpeechError, SpeechOutput, SpeechRequest};

/// Destination for decoded remote audio bytes
pub trait AudioSink: Send + Sync + 'static {
    /// Hand decoded audio to the playback device
    fn play(&self, audio: &[u8]) -> Result<(), SpeechError>;

    /// Cancel in-flight playback; idempotent
    fn cancel(&self);
}

/// Destination for text handed to a local synthesizer
pub trait Synthesizer: Send + Sync + 'static {
    /// Hand text to the synthesizer
    fn speak(&self, text: &str, lang: &Language) -> Result<(), SpeechError>;

    /// Cancel in-flight synthesis; idempotent
    fn cancel(&self);
}

/// Plays a backend-synthesized audio payload through an [`AudioSink`]
pub struct RemoteAudioPlayback {
    sink: Arc<dyn AudioSink>,
    active: AtomicBool,
}

impl RemoteAudioPlayback {
    pub fn new(sink: Arc<dyn AudioSink>) -> Self {
        Self {
            sink,
            active: AtomicBool::new(false),
        }
    }
}

#[async_trait]
impl SpeechOutput for RemoteAudioPlayback {
    async fn start(&self, request: &SpeechRequest) -> Result<(), SpeechError> {
        let SpeechRequest::RemoteAudio(payload) = request else {
            return Err(SpeechError::ChannelMismatch(
                "synthesis request sent to the remote-audio channel".to_string(),
            ));
        };

        let audio = payload
            .decode()
            .map_err(|e| SpeechError::Payload(e.to_string()))?;
        self.sink.play(&audio)?;
        self.active.store(true, Ordering::SeqCst);
        debug!(bytes = audio.len(), "Remote audio playback started");
        Ok(())
    }

    async fn stop(&self) {
        if self.active.swap(false, Ordering::SeqCst) {
            self.sink.cancel();
            debug!("Remote audio playback cancelled");
        }
    }

    fn is_active(&self) -> bool {
        self.active.load(Ordering::SeqCst)
    }

    fn channel(&self) -> ChannelKind {
        ChannelKind::RemoteAudio
    }
}

/// Synthesizes the answer text on the client through a [`Synthesizer`]
pub struct LocalSynthesis {
    synthesizer: Arc<dyn Synthesizer>,
    active: AtomicBool,
}

impl LocalSynthesis {
    pub fn new(synthesizer: Arc<dyn Synthesizer>) -> Self {
        Self {
            synthesizer,
            active: AtomicBool::new(false),
        }
    }
}

#[async_trait]
impl SpeechOutput for LocalSynthesis {
    async fn start(&self, request: &SpeechRequest) -> Result<(), SpeechError> {
        let SpeechRequest::Synthesize { text, lang } = request else {
            return Err(SpeechError::ChannelMismatch(
                "remote-audio request sent to the synthesis channel".to_string(),
            ));
        };

        self.synthesizer.speak(text, lang)?;
        self.active.store(true, Ordering::SeqCst);
        debug!(chars = text.len(), %lang, "Local synthesis started");
        Ok(())
    }

    async fn stop(&self) {
        if self.active.swap(false, Ordering::SeqCst) {
            self.synthesizer.cancel();
            debug!("Local synthesis cancelled");
        }
    }

    fn is_active(&self) -> bool {
        self.active.load(Ordering::SeqCst)
    }

    fn channel(&self) -> ChannelKind {
        ChannelKind::LocalSynthesis
    }
}

/// Sink that only logs what would be audible. Used when no audio device is
/// wired in (headless runs, tests).
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSink;

impl AudioSink for NullSink {
    fn play(&self, audio: &[u8]) -> Result<(), SpeechError> {
        info!(bytes = audio.len(), "Audio playback (no device attached)");
        Ok(())
    }

    fn cancel(&self) {
        debug!("Audio playback cancel (no device attached)");
    }
}

/// Synthesizer that only logs the text it would speak
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSynthesizer;

impl Synthesizer for NullSynthesizer {
    fn speak(&self, text: &str, lang: &Language) -> Result<(), SpeechError> {
        info!(%lang, "Speaking: {text}");
        Ok(())
    }

    fn cancel(&self) {
        debug!("Synthesis cancel (no synthesizer attached)");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assistant_core::AudioPayload;

    #[tokio::test]
    async fn test_remote_playback_lifecycle() {
        let playback = RemoteAudioPlayback::new(Arc::new(NullSink));
        assert!(!playback.is_active());

        let request = SpeechRequest::RemoteAudio(AudioPayload::new("aGVsbG8="));
        playback.start(&request).await.unwrap();
        assert!(playback.is_active());
        assert_eq!(playback.channel(), ChannelKind::RemoteAudio);

        playback.stop().await;
        assert!(!playback.is_active());
        // Second stop is a no-op
        playback.stop().await;
        assert!(!playback.is_active());
    }

    #[tokio::test]
    async fn test_remote_playback_rejects_bad_payload() {
        let playback = RemoteAudioPlayback::new(Arc::new(NullSink));
        let request = SpeechRequest::RemoteAudio(AudioPayload::new("not base64!!"));
        let err = playback.start(&request).await.unwrap_err();
        assert!(matches!(err, SpeechError::Payload(_)));
        assert!(!playback.is_active());
    }

    #[tokio::test]
    async fn test_remote_playback_rejects_synthesis_request() {
        let playback = RemoteAudioPlayback::new(Arc::new(NullSink));
        let request = SpeechRequest::Synthesize {
            text: "hello".into(),
            lang: Language::english(),
        };
        let err = playback.start(&request).await.unwrap_err();
        assert!(matches!(err, SpeechError::ChannelMismatch(_)));
    }

    #[tokio::test]
    async fn test_local_synthesis_lifecycle() {
        let synthesis = LocalSynthesis::new(Arc::new(NullSynthesizer));
        let request = SpeechRequest::Synthesize {
            text: "hello".into(),
            lang: Language::english(),
        };
        synthesis.start(&request).await.unwrap();
        assert!(synthesis.is_active());
        assert_eq!(synthesis.channel(), ChannelKind::LocalSynthesis);

        synthesis.stop().await;
        assert!(!synthesis.is_active());
    }

    #[tokio::test]
    async fn test_local_synthesis_rejects_audio_request() {
        let synthesis = LocalSynthesis::new(Arc::new(NullSynthesizer));
        let request = SpeechRequest::RemoteAudio(AudioPayload::new("aGVsbG8="));
        assert!(matches!(
            synthesis.start(&request).await.unwrap_err(),
            SpeechError::ChannelMismatch(_)
        ));
    }
}
