//! Conversation orchestration
//!
//! Features:
//! - Per-submission pipeline sequencing (translate-in → query →
//!   translate-out → speak)
//! - The interruption state machine driving the speech controller
//! - Conversation surface state (answer, error, loading, pending input)
//! - Broadcast event stream for front ends

pub mod orchestrator;

pub use orchestrator::{
    ConversationOrchestrator, ConversationState, OrchestratorConfig, OrchestratorEvent,
};
