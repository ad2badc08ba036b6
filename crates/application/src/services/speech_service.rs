//! Speech service - markdown to audio pipeline
//!
//! Each request runs strictly in order:
//! 1. Reject empty input
//! 2. Extract speakable text from the markdown
//! 3. Validate against the provider profile
//! 4. Dispatch to exactly one provider client
//!
//! Steps 1-3 never touch the network.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use ai_speech::{
    ProviderId, ProviderProfile, SynthesisOptions, SynthesisRequest, SynthesisResult,
    TextToSpeech, ValidationError,
};
use domain::SpeakableText;
use serde::Serialize;
use tracing::{debug, info, instrument};

use crate::error::ApplicationError;

/// Markdown plus caller options for one synthesis
#[derive(Debug, Clone, Default)]
pub struct SpeechInput {
    /// Markdown source
    pub text: String,
    pub options: SynthesisOptions,
}

impl SpeechInput {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            options: SynthesisOptions::default(),
        }
    }

    #[must_use]
    pub fn with_options(mut self, options: SynthesisOptions) -> Self {
        self.options = options;
        self
    }
}

/// Everything known after a successful synthesis
#[derive(Debug, Clone)]
pub struct SpeechOutcome {
    pub original_text: String,
    pub speakable_text: SpeakableText,
    pub result: SynthesisResult,
    /// Style instructions that were sent, if any
    pub instructions: Option<String>,
}

/// Provider description for discovery endpoints
#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProviderInfo {
    #[serde(flatten)]
    pub profile: &'static ProviderProfile,
    pub configured: bool,
}

/// Service turning markdown into speech through registered providers
#[derive(Default, Clone)]
pub struct SpeechService {
    providers: HashMap<ProviderId, Arc<dyn TextToSpeech>>,
}

impl fmt::Debug for SpeechService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SpeechService")
            .field("providers", &self.configured_providers())
            .finish()
    }
}

impl SpeechService {
    /// Create a service with no providers
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a provider client, replacing any client for the same backend
    #[must_use]
    pub fn with_provider(mut self, client: Arc<dyn TextToSpeech>) -> Self {
        self.register(client);
        self
    }

    /// Register a provider client in place
    pub fn register(&mut self, client: Arc<dyn TextToSpeech>) {
        let id = client.provider();
        debug!(provider = %id, "Registering TTS provider");
        self.providers.insert(id, client);
    }

    /// Providers with a registered client, in display order
    pub fn configured_providers(&self) -> Vec<ProviderId> {
        ProviderId::ALL
            .into_iter()
            .filter(|id| self.providers.contains_key(id))
            .collect()
    }

    pub fn is_configured(&self, provider: ProviderId) -> bool {
        self.providers.contains_key(&provider)
    }

    /// Describe one provider
    pub fn describe(&self, provider: ProviderId) -> ProviderInfo {
        ProviderInfo {
            profile: provider.profile(),
            configured: self.is_configured(provider),
        }
    }

    /// Describe every known provider
    pub fn describe_all(&self) -> Vec<ProviderInfo> {
        ProviderId::ALL
            .into_iter()
            .map(|id| self.describe(id))
            .collect()
    }

    /// Parse a provider name from a route or request
    pub fn resolve_provider(name: &str) -> Result<ProviderId, ApplicationError> {
        name.parse()
            .map_err(|_| ApplicationError::UnknownProvider(name.to_string()))
    }

    /// Extract and validate without contacting the provider
    pub fn prepare(
        &self,
        provider: ProviderId,
        input: &SpeechInput,
    ) -> Result<(SpeakableText, SynthesisRequest), ApplicationError> {
        if input.text.trim().is_empty() {
            return Err(ValidationError::EmptyInput.into());
        }

        let speakable = domain::speakable_text(&input.text)?;
        debug!(
            original_len = input.text.len(),
            speakable_chars = speakable.char_count(),
            "Extracted speakable text"
        );

        let request = provider
            .profile()
            .prepare(speakable.as_str(), &input.options)?;
        Ok((speakable, request))
    }

    /// Run the full pipeline for one provider
    #[instrument(skip(self, input), fields(provider = %provider, text_len = input.text.len()))]
    pub async fn synthesize(
        &self,
        provider: ProviderId,
        input: &SpeechInput,
    ) -> Result<SpeechOutcome, ApplicationError> {
        let (speakable_text, request) = self.prepare(provider, input)?;

        let client = self
            .providers
            .get(&provider)
            .ok_or(ApplicationError::ProviderNotConfigured(provider))?;

        let result = client.synthesize(&request).await?;

        info!(
            voice = %result.voice(),
            audio_size = result.size_bytes(),
            mime_type = result.mime_type(),
            "Speech synthesized"
        );

        Ok(SpeechOutcome {
            original_text: input.text.clone(),
            speakable_text,
            instructions: request.instructions().map(ToString::to_string),
            result,
        })
    }
}
