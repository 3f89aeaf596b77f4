//! Conversation orchestrator
//!
//! The only component with real sequencing: one `submit()` call runs the
//! whole pipeline (translate-in → query → translate-out → speak) and owns
//! every transition of the playback state machine. Collaborators come in as
//! trait objects so the pipeline is testable end to end with mocks.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use parking_lot::RwLock;
use tokio::sync::broadcast;
use tracing::{debug, info, warn};

use assistant_core::{
    Language, QueryBackend, QueryError, SubmissionRequest, SubmissionResult, Translator,
};
use assistant_speech::{PlaybackState, SpeechController};

/// Orchestrator tuning
#[derive(Debug, Clone)]
pub struct OrchestratorConfig {
    /// Whether published answers are made audible at all
    pub speech_enabled: bool,
}

impl Default for OrchestratorConfig {
    fn default() -> Self {
        Self {
            speech_enabled: true,
        }
    }
}

/// What a front end needs to render, mirroring the conversation surface:
/// current answer, current error, loading flag, and the pending input text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConversationState {
    /// Last published answer, until replaced or cleared
    pub answer: Option<String>,
    /// Last user-visible failure, until cleared
    pub error: Option<String>,
    /// True exactly while a submission is the current one and unsettled
    pub loading: bool,
    /// Text sitting in the input box; cleared by the explicit stop
    pub pending_input: String,
}

/// Orchestrator events
#[derive(Debug, Clone)]
pub enum OrchestratorEvent {
    /// A submission entered the pipeline
    SubmissionStarted,
    /// A result was published as the current answer
    AnswerPublished(String),
    /// The query failed; message is what the user sees
    QueryFailed(String),
    /// A channel started producing sound for the current answer
    PlaybackStarted,
    /// The user stopped playback
    Stopped,
}

/// Central pipeline component.
///
/// Owns the conversation surface state and the playback state machine; the
/// speech controller executes only commands issued from here.
pub struct ConversationOrchestrator {
    translator: Arc<dyn Translator>,
    backend: Arc<dyn QueryBackend>,
    speech: Arc<SpeechController>,
    config: OrchestratorConfig,
    state: RwLock<ConversationState>,
    /// Submission generation counter; publishing is last-writer-wins
    generation: AtomicU64,
    event_tx: broadcast::Sender<OrchestratorEvent>,
}

impl ConversationOrchestrator {
    /// Create an orchestrator with default tuning
    pub fn new(
        translator: Arc<dyn Translator>,
        backend: Arc<dyn QueryBackend>,
        speech: Arc<SpeechController>,
    ) -> Self {
        Self::with_config(translator, backend, speech, OrchestratorConfig::default())
    }

    /// Create an orchestrator with explicit tuning
    pub fn with_config(
        translator: Arc<dyn Translator>,
        backend: Arc<dyn QueryBackend>,
        speech: Arc<SpeechController>,
        config: OrchestratorConfig,
    ) -> Self {
        let (event_tx, _) = broadcast::channel(64);
        Self {
            translator,
            backend,
            speech,
            config,
            state: RwLock::new(ConversationState::default()),
            generation: AtomicU64::new(0),
            event_tx,
        }
    }

    /// Subscribe to orchestrator events
    pub fn subscribe(&self) -> broadcast::Receiver<OrchestratorEvent> {
        self.event_tx.subscribe()
    }

    /// Snapshot of the conversation surface state
    pub fn snapshot(&self) -> ConversationState {
        self.state.read().clone()
    }

    /// Current playback state
    pub fn playback_state(&self) -> PlaybackState {
        self.speech.state()
    }

    /// Mirror the input-box text so the explicit stop can clear it
    pub fn set_pending_input(&self, text: impl Into<String>) {
        self.state.write().pending_input = text.into();
    }

    /// Run one submission through the pipeline.
    ///
    /// Returns the published result, or `None` when the query failed or a
    /// newer submission overtook this one (its settling is then skipped
    /// entirely; the newer submission owns the surface state).
    pub async fn submit(&self, request: SubmissionRequest) -> Option<SubmissionResult> {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;

        // Enter loading; previous answer and error are gone either way.
        {
            let mut state = self.state.write();
            state.loading = true;
            state.answer = None;
            state.error = None;
        }
        let _ = self.event_tx.send(OrchestratorEvent::SubmissionStarted);
        self.speech.begin_submission().await;
        info!(session = %request.session, lang = %request.lang, "Submission started");

        // Translate-in: the backend is queried in English.
        let query_text = if request.lang.is_english() {
            request.raw_text.clone()
        } else {
            self.translator
                .translate(&request.raw_text, &Language::english())
                .await
        };

        // Query: the only step whose failure the user sees.
        let answer = match self
            .backend
            .query(&query_text, &request.session, &request.lang)
            .await
        {
            Ok(answer) => answer,
            Err(error) => {
                self.settle_failure(generation, &error).await;
                return None;
            }
        };

        // Translate-out, on the already-answered text.
        let answer_text = if request.lang.is_english() {
            answer.answer_text
        } else {
            self.translator
                .translate(&answer.answer_text, &request.lang)
                .await
        };

        let result = SubmissionResult {
            answer_text,
            audio_payload: answer.audio_payload,
        };

        self.publish(generation, result, &request.lang).await
    }

    /// The audio collaborator reports that playback ran to its natural end
    pub async fn playback_finished(&self) {
        self.speech.playback_finished().await;
    }

    /// Explicit user stop: cancel playback immediately, clear the pending
    /// input text, keep the last answer and error on the surface. Does not
    /// cancel an in-flight request.
    pub async fn stop(&self) {
        self.speech.stop().await;
        self.state.write().pending_input.clear();
        let _ = self.event_tx.send(OrchestratorEvent::Stopped);
        info!("Playback stopped, input cleared");
    }

    fn is_current(&self, generation: u64) -> bool {
        self.generation.load(Ordering::SeqCst) == generation
    }

    async fn publish(
        &self,
        generation: u64,
        result: SubmissionResult,
        lang: &Language,
    ) -> Option<SubmissionResult> {
        if !self.is_current(generation) {
            debug!(generation, "Stale submission settled, result dropped");
            return None;
        }

        {
            let mut state = self.state.write();
            state.answer = Some(result.answer_text.clone());
            state.loading = false;
        }
        let _ = self
            .event_tx
            .send(OrchestratorEvent::AnswerPublished(result.answer_text.clone()));
        info!(has_audio = result.has_audio(), "Answer published");

        if self.config.speech_enabled {
            match self.speech.speak(&result, lang).await {
                Ok(()) => {
                    let _ = self.event_tx.send(OrchestratorEvent::PlaybackStarted);
                }
                Err(error) => {
                    // The answer stays on the surface; only the audio is lost.
                    warn!(%error, "Playback failed");
                    self.speech.settle_idle().await;
                }
            }
        } else {
            self.speech.settle_idle().await;
        }

        Some(result)
    }

    async fn settle_failure(&self, generation: u64, error: &QueryError) {
        if !self.is_current(generation) {
            debug!(generation, "Stale submission failed, error dropped");
            return;
        }

        {
            let mut state = self.state.write();
            state.error = Some(error.to_string());
            state.loading = false;
        }
        self.speech.settle_idle().await;
        let _ = self
            .event_tx
            .send(OrchestratorEvent::QueryFailed(error.to_string()));
        warn!(%error, "Query failed");
    }
}
