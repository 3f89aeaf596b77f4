//! Assistant client entry point
//!
//! Wires the remote wrappers, the speech controller, and the orchestrator
//! together and drives them from a line-oriented prompt: plain lines are
//! submissions, `/lang <code>` changes the language selection, `/stop`
//! interrupts playback, `/quit` exits.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

use assistant_agent::{ConversationOrchestrator, OrchestratorConfig, OrchestratorEvent};
use assistant_config::load_settings;
use assistant_core::{pick_random, Language, SessionId, SubmissionRequest};
use assistant_remote::{HttpQueryClient, HttpTranslator, LanguageCatalog};
use assistant_speech::{
    LocalSynthesis, NullSink, NullSynthesizer, RemoteAudioPlayback, SpeechController,
};

const GREETINGS: &[&str] = &[
    "What are you working on?",
    "Ask me anything.",
    "What can I help with today?",
];

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config_file = std::env::args().nth(1).map(PathBuf::from);
    let settings = load_settings(config_file.as_deref())?;

    let client = reqwest::Client::builder()
        .timeout(settings.backend.timeout())
        .build()?;

    // One-shot catalog refresh before the first submission is accepted.
    let catalog = LanguageCatalog::new(client.clone(), settings.backend.base_url.clone());
    catalog.refresh().await;

    let translator = Arc::new(HttpTranslator::new(
        client.clone(),
        settings.backend.base_url.clone(),
    ));
    let backend = Arc::new(HttpQueryClient::new(
        client,
        settings.backend.base_url.clone(),
    ));
    let speech = Arc::new(SpeechController::new(
        Arc::new(RemoteAudioPlayback::new(Arc::new(NullSink))),
        Arc::new(LocalSynthesis::new(Arc::new(NullSynthesizer))),
    ));
    let orchestrator = Arc::new(ConversationOrchestrator::with_config(
        translator,
        backend,
        speech,
        OrchestratorConfig {
            speech_enabled: settings.speech.enabled,
        },
    ));

    // Generated once per client lifetime, never rotated.
    let session = SessionId::generate();
    info!(%session, "Client session started");

    let mut lang = settings.default_language();
    if !catalog.contains(&lang) {
        warn!(%lang, "Configured language not in the catalog, using English");
        lang = Language::english();
    }

    let mut events = orchestrator.subscribe();
    tokio::spawn(async move {
        while let Ok(event) = events.recv().await {
            match event {
                OrchestratorEvent::SubmissionStarted => debug!("Submission started"),
                OrchestratorEvent::AnswerPublished(_) => debug!("Answer published"),
                OrchestratorEvent::QueryFailed(message) => debug!(%message, "Query failed"),
                OrchestratorEvent::PlaybackStarted => debug!("Playback started"),
                OrchestratorEvent::Stopped => debug!("Playback stopped"),
            }
        }
    });

    let seed = session.as_str().bytes().map(u64::from).sum::<u64>();
    println!("{}", pick_random(seed, GREETINGS).unwrap_or(&GREETINGS[0]));
    println!(
        "Languages: {}",
        catalog
            .current()
            .iter()
            .map(|entry| entry.code.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    );

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let line = line.trim().to_string();
        if line.is_empty() {
            continue;
        }

        if line == "/quit" {
            break;
        } else if line == "/stop" {
            orchestrator.stop().await;
            println!("(playback stopped)");
        } else if let Some(code) = line.strip_prefix("/lang") {
            let candidate = Language::new(code.trim());
            if catalog.contains(&candidate) {
                println!(
                    "Language set to {}",
                    catalog
                        .label_of(&candidate)
                        .unwrap_or_else(|| candidate.code().to_string())
                );
                lang = candidate;
            } else {
                println!("Unsupported language: {}", code.trim());
            }
        } else if line.starts_with('/') {
            println!("Commands: /lang <code>, /stop, /quit");
        } else {
            orchestrator.set_pending_input(line.as_str());
            let request = SubmissionRequest {
                raw_text: line,
                lang: lang.clone(),
                session: session.clone(),
            };
            orchestrator.submit(request).await;

            let state = orchestrator.snapshot();
            if let Some(answer) = &state.answer {
                println!("AI: {answer}");
            }
            if let Some(error) = &state.error {
                println!("Error: {error}");
            }
            // The null sinks play instantly; report completion so the
            // state machine loops back to Idle.
            orchestrator.playback_finished().await;
        }
    }

    info!("Client session ended");
    Ok(())
}
