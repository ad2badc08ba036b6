//! Infrastructure adapters
//!
//! Adapters connect application ports to concrete implementations.

mod resilient_speech;
mod speech_adapter;

pub use resilient_speech::ResilientSpeechProvider;
pub use speech_adapter::build_speech_service;
