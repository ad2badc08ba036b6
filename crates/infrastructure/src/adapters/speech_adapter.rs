//! Speech adapter - wires configured provider clients into `SpeechService`

use std::sync::Arc;
use std::time::Duration;

use ai_speech::{SpeechError, build_provider};
use application::SpeechService;
use tracing::{info, warn};

use super::ResilientSpeechProvider;
use crate::config::AppConfig;

/// Build the speech service from configuration
///
/// Every provider with an API key gets a client wrapped in
/// `ResilientSpeechProvider`. Providers without a key are left out and
/// report as not configured.
///
/// # Errors
///
/// Returns `SpeechError::Configuration` if the speech section is invalid or
/// a client cannot be created.
pub fn build_speech_service(config: &AppConfig) -> Result<SpeechService, SpeechError> {
    let speech = &config.speech;
    let timeout = Duration::from_millis(speech.timeout_ms);
    let mut service = SpeechService::new();

    for id in speech.configured_providers() {
        let client = build_provider(id, speech)?;
        service.register(Arc::new(ResilientSpeechProvider::new(
            client,
            config.retry.clone(),
            timeout,
        )));
        info!(provider = %id, endpoint = %speech.endpoint(id), "TTS provider configured");
    }

    if service.configured_providers().is_empty() {
        warn!("No TTS provider has an API key; synthesis requests will fail with 503");
    }

    Ok(service)
}
