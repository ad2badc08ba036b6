//! Application state shared across handlers

use std::sync::Arc;

use application::SpeechService;
use infrastructure::AppConfig;

/// Shared application state
#[derive(Debug, Clone)]
pub struct AppState {
    /// Markdown to speech pipeline
    pub speech_service: Arc<SpeechService>,
    /// Application configuration
    pub config: Arc<AppConfig>,
}

impl AppState {
    pub fn new(speech_service: SpeechService, config: AppConfig) -> Self {
        Self {
            speech_service: Arc::new(speech_service),
            config: Arc::new(config),
        }
    }

    /// Whether success envelopes echo the original and speakable text
    pub fn include_diagnostics(&self) -> bool {
        self.config.speech.include_diagnostics
    }
}
