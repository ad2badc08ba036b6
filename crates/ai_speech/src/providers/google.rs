//! Google Cloud Text-to-Speech provider
//!
//! Calls `text:synthesize` with an API key header. The response carries the
//! audio as base64 in `audioContent`; it is decoded and passed on as-is.

use async_trait::async_trait;
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use super::{HttpBackend, api_error};
use crate::config::SpeechConfig;
use crate::error::SpeechError;
use crate::ports::TextToSpeech;
use crate::profile::ProviderId;
use crate::types::{AudioFormat, SynthesisRequest, SynthesisResult};

const API_KEY_HEADER: &str = "x-goog-api-key";

/// Client for Google Cloud Text-to-Speech
#[derive(Debug, Clone)]
pub struct GoogleSpeechProvider {
    backend: HttpBackend,
}

impl GoogleSpeechProvider {
    /// Create a new Google provider
    ///
    /// # Errors
    ///
    /// Returns `SpeechError::Configuration` if the configuration is invalid
    /// or no Google API key is set.
    pub fn new(config: &SpeechConfig) -> Result<Self, SpeechError> {
        Ok(Self {
            backend: HttpBackend::new(ProviderId::Google, config)?,
        })
    }

    /// Google encoding name; only MP3 is requested
    fn audio_encoding(format: AudioFormat) -> Result<&'static str, SpeechError> {
        match format {
            AudioFormat::Mp3 => Ok("MP3"),
            other => Err(SpeechError::Configuration(format!(
                "Google TTS is not set up to produce {other} audio"
            ))),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SynthesizeRequest<'a> {
    input: SynthesisInput<'a>,
    voice: VoiceSelection<'a>,
    audio_config: AudioConfig,
}

#[derive(Debug, Serialize)]
struct SynthesisInput<'a> {
    text: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct VoiceSelection<'a> {
    language_code: &'a str,
    name: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct AudioConfig {
    audio_encoding: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    speaking_rate: Option<f64>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SynthesizeResponse {
    #[serde(default)]
    audio_content: String,
}

#[async_trait]
impl TextToSpeech for GoogleSpeechProvider {
    fn provider(&self) -> ProviderId {
        ProviderId::Google
    }

    #[instrument(skip(self, request), fields(text_len = request.text().len(), voice = %request.voice()))]
    async fn synthesize(&self, request: &SynthesisRequest) -> Result<SynthesisResult, SpeechError> {
        debug!("Synthesizing speech with Google Cloud TTS");

        let audio_encoding = Self::audio_encoding(request.format())?;

        let language_code = request
            .language_code()
            .or(ProviderId::Google.profile().default_language_code)
            .unwrap_or("en-US");

        let body = SynthesizeRequest {
            input: SynthesisInput {
                text: request.text(),
            },
            voice: VoiceSelection {
                language_code,
                name: request.voice(),
            },
            audio_config: AudioConfig {
                audio_encoding,
                speaking_rate: request.speed(),
            },
        };

        let response = self
            .backend
            .client
            .post(&self.backend.endpoint)
            .header(API_KEY_HEADER, self.backend.key())
            .json(&body)
            .send()
            .await
            .map_err(|e| self.backend.transport_error(&e))?;

        if !response.status().is_success() {
            return Err(api_error(ProviderId::Google, response).await);
        }

        let raw = self.backend.read_bytes(response).await?;
        let parsed: SynthesizeResponse = serde_json::from_slice(&raw)
            .map_err(|e| SpeechError::InvalidResponse(format!("Failed to parse response: {e}")))?;

        if parsed.audio_content.is_empty() {
            return Err(SpeechError::InvalidResponse(
                "Response contained no audio content".to_string(),
            ));
        }

        let audio = STANDARD
            .decode(parsed.audio_content.as_bytes())
            .map_err(|e| SpeechError::InvalidResponse(format!("Invalid base64 audio: {e}")))?;

        debug!(audio_size = audio.len(), "Speech synthesis complete");

        Ok(SynthesisResult::new(audio, request.format(), request))
    }
}
