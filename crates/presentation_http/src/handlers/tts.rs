//! Text-to-speech handlers

use ai_speech::{AudioFormat, SynthesisOptions};
use application::{ProviderInfo, SpeechInput, SpeechService, SuccessEnvelope};
use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::{error::ApiError, state::AppState};

/// Synthesis request body
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TtsRequest {
    /// Markdown to read aloud
    pub text: String,
    #[serde(default)]
    pub voice: Option<String>,
    #[serde(default)]
    pub model: Option<String>,
    #[serde(default)]
    pub speed: Option<f64>,
    /// Style instructions (OpenAI `gpt-4o-mini-tts` only)
    #[serde(default)]
    pub instructions: Option<String>,
    #[serde(default)]
    pub format: Option<AudioFormat>,
    /// BCP-47 language code (Google only)
    #[serde(default)]
    pub language_code: Option<String>,
}

impl From<TtsRequest> for SpeechInput {
    fn from(request: TtsRequest) -> Self {
        let TtsRequest {
            text,
            voice,
            model,
            speed,
            instructions,
            format,
            language_code,
        } = request;

        Self {
            text,
            options: SynthesisOptions {
                voice,
                model,
                speed,
                instructions,
                language_code,
                format,
            },
        }
    }
}

/// All provider descriptions
#[derive(Debug, Serialize)]
pub struct ProvidersResponse {
    pub providers: Vec<ProviderInfo>,
}

/// Synthesize markdown with one provider
///
/// The provider is checked before the body so an unknown name is a 404 even
/// when the body is malformed.
#[instrument(skip(state, body), fields(provider = %provider))]
pub async fn synthesize(
    State(state): State<AppState>,
    Path(provider): Path<String>,
    body: Result<Json<TtsRequest>, JsonRejection>,
) -> Result<Json<SuccessEnvelope>, ApiError> {
    let provider = SpeechService::resolve_provider(&provider)?;
    let Json(request) = body?;

    let input = SpeechInput::from(request);
    let outcome = state.speech_service.synthesize(provider, &input).await?;

    Ok(Json(SuccessEnvelope::from_outcome(
        outcome,
        state.include_diagnostics(),
    )))
}

/// Describe one provider
pub async fn describe_provider(
    State(state): State<AppState>,
    Path(provider): Path<String>,
) -> Result<Json<ProviderInfo>, ApiError> {
    let provider = SpeechService::resolve_provider(&provider)?;
    Ok(Json(state.speech_service.describe(provider)))
}

/// List every provider
pub async fn list_providers(State(state): State<AppState>) -> Json<ProvidersResponse> {
    Json(ProvidersResponse {
        providers: state.speech_service.describe_all(),
    })
}
