//! Playback cancellation state machine
//!
//! Owns the single audible stream: `Idle → AwaitingOutput → Speaking →
//! Idle`, with `Stopped` reachable from `AwaitingOutput` or `Speaking` via
//! the explicit user stop. `Stopped` records that playback ended by user
//! action rather than naturally; it behaves like `Idle` for every
//! subsequent operation.

use std::sync::Arc;

use parking_lot::Mutex;
use tracing::{debug, warn};

use assistant_core::{
    ChannelKind, Language, SpeechError, SpeechOutput, SpeechRequest, SubmissionResult,
};

/// Where the single spoken-output stream currently is
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackState {
    /// Nothing audible, nothing pending
    Idle,
    /// A submission is in flight; output will follow its result
    AwaitingOutput,
    /// One channel is producing sound
    Speaking,
    /// Playback was cancelled by the user
    Stopped,
}

/// Manages the one active spoken-output channel.
///
/// Both channels are injected; the controller guarantees that starting one
/// stops the other first, so at no instant are two channels audible.
pub struct SpeechController {
    remote: Arc<dyn SpeechOutput>,
    local: Arc<dyn SpeechOutput>,
    state: Mutex<PlaybackState>,
    active_channel: Mutex<Option<ChannelKind>>,
}

impl SpeechController {
    /// Create a controller over the two channels
    pub fn new(remote: Arc<dyn SpeechOutput>, local: Arc<dyn SpeechOutput>) -> Self {
        Self {
            remote,
            local,
            state: Mutex::new(PlaybackState::Idle),
            active_channel: Mutex::new(None),
        }
    }

    /// Current state
    pub fn state(&self) -> PlaybackState {
        *self.state.lock()
    }

    /// Whether a channel is audible right now
    pub fn is_active(&self) -> bool {
        self.state() == PlaybackState::Speaking
    }

    /// A submission has started: cancel anything audible and wait for the
    /// result.
    pub async fn begin_submission(&self) {
        self.cancel_active().await;
        *self.state.lock() = PlaybackState::AwaitingOutput;
        debug!("Awaiting output");
    }

    /// A result arrived: make it audible on the channel it selects (remote
    /// audio when the payload is present, local synthesis otherwise).
    pub async fn speak(
        &self,
        result: &SubmissionResult,
        lang: &Language,
    ) -> Result<(), SpeechError> {
        let request = SpeechRequest::for_result(result, lang);
        let channel = request.channel();

        // One audible stream, ever: whatever is playing stops first.
        self.cancel_active().await;

        let output = self.output_for(channel);
        if let Err(e) = output.start(&request).await {
            *self.state.lock() = PlaybackState::Idle;
            return Err(e);
        }

        *self.active_channel.lock() = Some(channel);
        *self.state.lock() = PlaybackState::Speaking;
        debug!(%channel, "Playback started");
        Ok(())
    }

    /// Explicit user stop: cancel the active channel and record that
    /// playback ended by user action. No-op outside `AwaitingOutput` /
    /// `Speaking`.
    pub async fn stop(&self) {
        let interruptible = matches!(
            self.state(),
            PlaybackState::AwaitingOutput | PlaybackState::Speaking
        );
        if !interruptible {
            return;
        }

        self.cancel_active().await;
        *self.state.lock() = PlaybackState::Stopped;
        debug!("Playback stopped by user");
    }

    /// The submission settled without anything to play (failure, or
    /// completion without audio output): back to `Idle` without passing
    /// through `Speaking`.
    pub async fn settle_idle(&self) {
        self.cancel_active().await;
        *self.state.lock() = PlaybackState::Idle;
    }

    /// The active channel reports natural completion
    pub async fn playback_finished(&self) {
        if self.state() != PlaybackState::Speaking {
            return;
        }
        self.cancel_active().await;
        *self.state.lock() = PlaybackState::Idle;
        debug!("Playback finished");
    }

    fn output_for(&self, channel: ChannelKind) -> &Arc<dyn SpeechOutput> {
        match channel {
            ChannelKind::RemoteAudio => &self.remote,
            ChannelKind::LocalSynthesis => &self.local,
        }
    }

    async fn cancel_active(&self) {
        let channel = self.active_channel.lock().take();
        if let Some(channel) = channel {
            self.output_for(channel).stop().await;
        }
        // Neither output may keep running outside the recorded active
        // channel.
        if self.remote.is_active() || self.local.is_active() {
            warn!("Speech output active outside the recorded channel, stopping");
            self.remote.stop().await;
            self.local.stop().await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assistant_core::AudioPayload;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicBool, Ordering};

    /// Records start/stop ordering across both channels.
    struct RecordingOutput {
        kind: ChannelKind,
        active: AtomicBool,
        fail_start: bool,
        events: Arc<Mutex<Vec<String>>>,
    }

    impl RecordingOutput {
        fn new(kind: ChannelKind, events: Arc<Mutex<Vec<String>>>) -> Arc<Self> {
            Arc::new(Self {
                kind,
                active: AtomicBool::new(false),
                fail_start: false,
                events,
            })
        }

        fn failing(kind: ChannelKind, events: Arc<Mutex<Vec<String>>>) -> Arc<Self> {
            Arc::new(Self {
                kind,
                active: AtomicBool::new(false),
                fail_start: true,
                events,
            })
        }
    }

    #[async_trait]
    impl SpeechOutput for RecordingOutput {
        async fn start(&self, _request: &SpeechRequest) -> Result<(), SpeechError> {
            if self.fail_start {
                return Err(SpeechError::Backend("start refused".to_string()));
            }
            self.active.store(true, Ordering::SeqCst);
            self.events.lock().push(format!("start:{}", self.kind));
            Ok(())
        }

        async fn stop(&self) {
            if self.active.swap(false, Ordering::SeqCst) {
                self.events.lock().push(format!("stop:{}", self.kind));
            }
        }

        fn is_active(&self) -> bool {
            self.active.load(Ordering::SeqCst)
        }

        fn channel(&self) -> ChannelKind {
            self.kind
        }
    }

    fn harness() -> (
        SpeechController,
        Arc<RecordingOutput>,
        Arc<RecordingOutput>,
        Arc<Mutex<Vec<String>>>,
    ) {
        let events = Arc::new(Mutex::new(Vec::new()));
        let remote = RecordingOutput::new(ChannelKind::RemoteAudio, events.clone());
        let local = RecordingOutput::new(ChannelKind::LocalSynthesis, events.clone());
        let controller = SpeechController::new(remote.clone(), local.clone());
        (controller, remote, local, events)
    }

    fn audio_result() -> SubmissionResult {
        SubmissionResult {
            answer_text: "hello".into(),
            audio_payload: Some(AudioPayload::new("aGVsbG8=")),
        }
    }

    fn text_result() -> SubmissionResult {
        SubmissionResult {
            answer_text: "hello".into(),
            audio_payload: None,
        }
    }

    #[tokio::test]
    async fn test_idle_until_submission() {
        let (controller, _, _, _) = harness();
        assert_eq!(controller.state(), PlaybackState::Idle);
        assert!(!controller.is_active());

        controller.begin_submission().await;
        assert_eq!(controller.state(), PlaybackState::AwaitingOutput);
    }

    #[tokio::test]
    async fn test_speak_selects_channel_by_payload() {
        let (controller, remote, local, _) = harness();

        controller.begin_submission().await;
        controller
            .speak(&audio_result(), &Language::english())
            .await
            .unwrap();
        assert_eq!(controller.state(), PlaybackState::Speaking);
        assert!(remote.is_active());
        assert!(!local.is_active());

        controller.begin_submission().await;
        controller
            .speak(&text_result(), &Language::english())
            .await
            .unwrap();
        assert!(local.is_active());
        assert!(!remote.is_active());
    }

    #[tokio::test]
    async fn test_starting_one_channel_stops_the_other_first() {
        let (controller, remote, local, events) = harness();

        controller
            .speak(&text_result(), &Language::english())
            .await
            .unwrap();
        controller
            .speak(&audio_result(), &Language::english())
            .await
            .unwrap();

        assert!(remote.is_active());
        assert!(!local.is_active());
        assert_eq!(
            *events.lock(),
            vec![
                "start:local synthesis",
                "stop:local synthesis",
                "start:remote audio"
            ]
        );
    }

    #[tokio::test]
    async fn test_begin_submission_cancels_active_speech() {
        let (controller, _, local, events) = harness();

        controller
            .speak(&text_result(), &Language::english())
            .await
            .unwrap();
        assert!(local.is_active());

        controller.begin_submission().await;
        assert!(!local.is_active());
        assert_eq!(controller.state(), PlaybackState::AwaitingOutput);
        assert!(events.lock().contains(&"stop:local synthesis".to_string()));
    }

    #[tokio::test]
    async fn test_explicit_stop_while_speaking() {
        let (controller, remote, _, _) = harness();

        controller
            .speak(&audio_result(), &Language::english())
            .await
            .unwrap();
        controller.stop().await;

        assert_eq!(controller.state(), PlaybackState::Stopped);
        assert!(!remote.is_active());
    }

    #[tokio::test]
    async fn test_explicit_stop_while_awaiting() {
        let (controller, _, _, _) = harness();
        controller.begin_submission().await;
        controller.stop().await;
        assert_eq!(controller.state(), PlaybackState::Stopped);
    }

    #[tokio::test]
    async fn test_stop_when_idle_is_noop() {
        let (controller, _, _, _) = harness();
        controller.stop().await;
        assert_eq!(controller.state(), PlaybackState::Idle);
    }

    #[tokio::test]
    async fn test_failure_settles_idle_without_speaking() {
        let (controller, _, _, _) = harness();
        controller.begin_submission().await;
        controller.settle_idle().await;
        assert_eq!(controller.state(), PlaybackState::Idle);
    }

    #[tokio::test]
    async fn test_playback_finished_returns_to_idle() {
        let (controller, remote, _, _) = harness();
        controller
            .speak(&audio_result(), &Language::english())
            .await
            .unwrap();

        controller.playback_finished().await;
        assert_eq!(controller.state(), PlaybackState::Idle);
        assert!(!remote.is_active());
    }

    #[tokio::test]
    async fn test_start_failure_leaves_idle() {
        let events = Arc::new(Mutex::new(Vec::new()));
        let remote = RecordingOutput::failing(ChannelKind::RemoteAudio, events.clone());
        let local = RecordingOutput::new(ChannelKind::LocalSynthesis, events);
        let controller = SpeechController::new(remote, local);

        controller.begin_submission().await;
        let err = controller
            .speak(&audio_result(), &Language::english())
            .await
            .unwrap_err();
        assert!(matches!(err, SpeechError::Backend(_)));
        assert_eq!(controller.state(), PlaybackState::Idle);
        assert!(!controller.is_active());
    }

    #[tokio::test]
    async fn test_never_two_channels_active() {
        let (controller, remote, local, _) = harness();

        for _ in 0..4 {
            controller
                .speak(&text_result(), &Language::english())
                .await
                .unwrap();
            assert!(!(remote.is_active() && local.is_active()));
            controller
                .speak(&audio_result(), &Language::english())
                .await
                .unwrap();
            assert!(!(remote.is_active() && local.is_active()));
        }
    }

    #[tokio::test]
    async fn test_submission_after_stop() {
        let (controller, _, _, _) = harness();
        controller
            .speak(&audio_result(), &Language::english())
            .await
            .unwrap();
        controller.stop().await;
        assert_eq!(controller.state(), PlaybackState::Stopped);

        // Stopped behaves like Idle for the next submission
        controller.begin_submission().await;
        assert_eq!(controller.state(), PlaybackState::AwaitingOutput);
        controller
            .speak(&text_result(), &Language::english())
            .await
            .unwrap();
        assert_eq!(controller.state(), PlaybackState::Speaking);
    }
}
