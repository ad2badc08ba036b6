//! Application services - Use case implementations

mod speech_service;

pub use speech_service::{ProviderInfo, SpeechInput, SpeechOutcome, SpeechService};
