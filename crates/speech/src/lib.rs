//! Speech output for the assistant client
//!
//! This crate provides:
//! - The two [`assistant_core::SpeechOutput`] channel implementations
//!   (remote audio playback, local synthesis), each driving an injected
//!   sink; the actual audio device and synthesizer are external
//!   collaborators
//! - [`SpeechController`], the playback cancellation state machine that
//!   guarantees at most one audible channel at any instant

pub mod controller;
pub mod outputs;

pub use controller::{PlaybackState, SpeechController};
pub use outputs::{
    AudioSink, LocalSynthesis, NullSink, NullSynthesizer, RemoteAudioPlayback, Synthesizer,
};
