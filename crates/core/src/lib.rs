//! Core traits and types for the assistant client
//!
//! This crate provides foundational types used across all other crates:
//! - Capability traits for the remote collaborators (translation, query
//!   backend, speech output)
//! - Language selection and catalog entry types
//! - Session identity
//! - Submission request/result types
//! - The user-visible error taxonomy

pub mod error;
pub mod language;
pub mod session;
pub mod submission;
pub mod traits;

pub use error::{QueryError, SpeechError};
pub use language::{fallback_catalog, Language, LanguageEntry};
pub use session::{pick_random, SessionId};
pub use submission::{AudioPayload, SubmissionRequest, SubmissionResult};

// Trait re-exports
pub use traits::{
    // Query backend
    QueryAnswer, QueryBackend,
    // Speech output
    ChannelKind, SpeechOutput, SpeechRequest,
    // Translation
    NoopTranslator, Translator,
};
