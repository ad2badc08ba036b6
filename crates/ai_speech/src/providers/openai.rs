//! OpenAI-compatible speech provider
//!
//! Implements `TextToSpeech` for the `/audio/speech` contract used by both
//! OpenAI and Groq (PlayAI voices). The body carries model, input, voice and
//! response format; speed and style instructions are sent only when the
//! validated request holds them, which the profiles allow for OpenAI alone.
//!
//! # Supported Audio Formats
//!
//! - OpenAI: mp3, wav, opus, aac, flac
//! - Groq: mp3, wav

use async_trait::async_trait;
use serde::Serialize;
use tracing::{debug, instrument};

use super::{HttpBackend, api_error};
use crate::config::SpeechConfig;
use crate::error::SpeechError;
use crate::ports::TextToSpeech;
use crate::profile::ProviderId;
use crate::types::{SynthesisRequest, SynthesisResult};

/// Client for OpenAI-compatible speech endpoints
#[derive(Debug, Clone)]
pub struct OpenAISpeechProvider {
    provider: ProviderId,
    backend: HttpBackend,
}

impl OpenAISpeechProvider {
    /// Create a client for the OpenAI speech endpoint
    ///
    /// # Errors
    ///
    /// Returns `SpeechError::Configuration` if the configuration is invalid
    /// or no OpenAI API key is set.
    pub fn openai(config: &SpeechConfig) -> Result<Self, SpeechError> {
        Self::new(ProviderId::OpenAi, config)
    }

    /// Create a client for Groq's PlayAI voices
    ///
    /// # Errors
    ///
    /// Returns `SpeechError::Configuration` if the configuration is invalid
    /// or no Groq API key is set.
    pub fn groq(config: &SpeechConfig) -> Result<Self, SpeechError> {
        Self::new(ProviderId::Groq, config)
    }

    fn new(provider: ProviderId, config: &SpeechConfig) -> Result<Self, SpeechError> {
        Ok(Self {
            provider,
            backend: HttpBackend::new(provider, config)?,
        })
    }
}

/// Speech request body
#[derive(Debug, Serialize)]
struct TtsRequest<'a> {
    model: &'a str,
    input: &'a str,
    voice: &'a str,
    response_format: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    speed: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    instructions: Option<&'a str>,
}

#[async_trait]
impl TextToSpeech for OpenAISpeechProvider {
    fn provider(&self) -> ProviderId {
        self.provider
    }

    #[instrument(
        skip(self, request),
        fields(provider = %self.provider, text_len = request.text().len(), voice = %request.voice())
    )]
    async fn synthesize(&self, request: &SynthesisRequest) -> Result<SynthesisResult, SpeechError> {
        debug!("Synthesizing speech");

        let model = request
            .model()
            .or(self.provider.profile().default_model)
            .ok_or_else(|| {
                SpeechError::Configuration(format!("{} requires a model", self.provider))
            })?;

        let body = TtsRequest {
            model,
            input: request.text(),
            voice: request.voice(),
            response_format: request.format().as_str(),
            speed: request.speed(),
            instructions: request.instructions(),
        };

        let response = self
            .backend
            .client
            .post(&self.backend.endpoint)
            .bearer_auth(self.backend.key())
            .json(&body)
            .send()
            .await
            .map_err(|e| self.backend.transport_error(&e))?;

        if !response.status().is_success() {
            return Err(api_error(self.provider, response).await);
        }

        let audio = self.backend.read_bytes(response).await?;

        debug!(audio_size = audio.len(), "Speech synthesis complete");

        Ok(SynthesisResult::new(audio, request.format(), request))
    }
}

#[cfg(test)]
mod tests {
    use secrecy::SecretString;
    use wiremock::matchers::{body_json, body_partial_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;
    use crate::types::{AudioFormat, SynthesisOptions};

    fn config_for(id: ProviderId, mock_server: &MockServer) -> SpeechConfig {
        let mut config = SpeechConfig::default();
        let provider = config.provider_mut(id);
        provider.api_key = Some(SecretString::from("test-api-key"));
        provider.endpoint = Some(format!("{}/audio/speech", mock_server.uri()));
        config
    }

    fn request(id: ProviderId, text: &str, options: &SynthesisOptions) -> SynthesisRequest {
        id.profile().prepare(text, options).unwrap()
    }

    mod openai {
        use super::*;

        fn provider(mock_server: &MockServer) -> OpenAISpeechProvider {
            OpenAISpeechProvider::openai(&config_for(ProviderId::OpenAi, mock_server)).unwrap()
        }

        #[tokio::test]
        async fn synthesize_success() {
            let mock_server = MockServer::start().await;
            let audio_bytes = vec![0u8; 1024];

            Mock::given(method("POST"))
                .and(path("/audio/speech"))
                .and(header("authorization", "Bearer test-api-key"))
                .and(body_json(serde_json::json!({
                    "model": "tts-1",
                    "input": "Hello, world!",
                    "voice": "alloy",
                    "response_format": "mp3"
                })))
                .respond_with(ResponseTemplate::new(200).set_body_bytes(audio_bytes.clone()))
                .expect(1)
                .mount(&mock_server)
                .await;

            let result = provider(&mock_server)
                .synthesize(&request(
                    ProviderId::OpenAi,
                    "Hello, world!",
                    &SynthesisOptions::default(),
                ))
                .await
                .unwrap();

            assert_eq!(result.audio().as_ref(), audio_bytes.as_slice());
            assert_eq!(result.mime_type(), "audio/mpeg");
            assert_eq!(result.voice(), "alloy");
            assert_eq!(result.model(), Some("tts-1"));
        }

        #[tokio::test]
        async fn sends_speed_and_instructions() {
            let mock_server = MockServer::start().await;

            Mock::given(method("POST"))
                .and(path("/audio/speech"))
                .and(body_partial_json(serde_json::json!({
                    "model": "gpt-4o-mini-tts",
                    "voice": "coral",
                    "speed": 1.5,
                    "instructions": "Speak warmly",
                    "response_format": "wav"
                })))
                .respond_with(ResponseTemplate::new(200).set_body_bytes(vec![1u8; 16]))
                .expect(1)
                .mount(&mock_server)
                .await;

            let options = SynthesisOptions::default()
                .with_model("gpt-4o-mini-tts")
                .with_speed(1.5)
                .with_instructions("Speak warmly")
                .with_format(AudioFormat::Wav);
            let result = provider(&mock_server)
                .synthesize(&request(ProviderId::OpenAi, "Test", &options))
                .await
                .unwrap();

            assert_eq!(result.format(), AudioFormat::Wav);
            assert_eq!(result.mime_type(), "audio/wav");
        }

        #[tokio::test]
        async fn api_error_keeps_status_and_message() {
            let mock_server = MockServer::start().await;

            Mock::given(method("POST"))
                .and(path("/audio/speech"))
                .respond_with(ResponseTemplate::new(401).set_body_json(serde_json::json!({
                    "error": {
                        "message": "Incorrect API key provided",
                        "type": "invalid_request_error",
                        "code": "invalid_api_key"
                    }
                })))
                .expect(1)
                .mount(&mock_server)
                .await;

            let err = provider(&mock_server)
                .synthesize(&request(ProviderId::OpenAi, "Test", &SynthesisOptions::default()))
                .await
                .unwrap_err();

            assert_eq!(err.status(), Some(401));
            assert!(err.to_string().contains("Incorrect API key provided"));
            assert!(err.details().contains("invalid_api_key"));
            assert!(!err.is_retryable());
        }

        #[tokio::test]
        async fn server_error_is_retryable() {
            let mock_server = MockServer::start().await;

            Mock::given(method("POST"))
                .and(path("/audio/speech"))
                .respond_with(ResponseTemplate::new(503).set_body_string("upstream down"))
                .expect(1)
                .mount(&mock_server)
                .await;

            let err = provider(&mock_server)
                .synthesize(&request(ProviderId::OpenAi, "Test", &SynthesisOptions::default()))
                .await
                .unwrap_err();

            assert_eq!(err.status(), Some(503));
            assert_eq!(err.details(), "upstream down");
            assert!(err.is_retryable());
        }

        #[tokio::test]
        async fn connection_refused() {
            let mut config = SpeechConfig::default();
            config.openai.api_key = Some(SecretString::from("key"));
            config.openai.endpoint = Some("http://127.0.0.1:1/audio/speech".to_string());
            let provider = OpenAISpeechProvider::openai(&config).unwrap();

            let err = provider
                .synthesize(&request(ProviderId::OpenAi, "Test", &SynthesisOptions::default()))
                .await
                .unwrap_err();

            assert!(err.is_retryable());
            assert_eq!(err.status(), None);
        }
    }

    mod groq {
        use super::*;

        #[tokio::test]
        async fn synthesize_with_playai_defaults() {
            let mock_server = MockServer::start().await;

            Mock::given(method("POST"))
                .and(path("/audio/speech"))
                .and(header("authorization", "Bearer test-api-key"))
                .and(body_json(serde_json::json!({
                    "model": "playai-tts",
                    "input": "Hello",
                    "voice": "Fritz-PlayAI",
                    "response_format": "mp3"
                })))
                .respond_with(ResponseTemplate::new(200).set_body_bytes(vec![7u8; 64]))
                .expect(1)
                .mount(&mock_server)
                .await;

            let provider =
                OpenAISpeechProvider::groq(&config_for(ProviderId::Groq, &mock_server)).unwrap();
            // Speed is not part of the Groq contract and never reaches the wire
            let options = SynthesisOptions::default().with_speed(2.0);
            let result = provider
                .synthesize(&request(ProviderId::Groq, "Hello", &options))
                .await
                .unwrap();

            assert_eq!(provider.provider(), ProviderId::Groq);
            assert_eq!(result.size_bytes(), 64);
            assert_eq!(result.provider(), ProviderId::Groq);
        }

        #[tokio::test]
        async fn wav_response_format() {
            let mock_server = MockServer::start().await;

            Mock::given(method("POST"))
                .and(body_partial_json(serde_json::json!({ "response_format": "wav" })))
                .respond_with(ResponseTemplate::new(200).set_body_bytes(vec![0u8; 8]))
                .expect(1)
                .mount(&mock_server)
                .await;

            let provider =
                OpenAISpeechProvider::groq(&config_for(ProviderId::Groq, &mock_server)).unwrap();
            let options = SynthesisOptions::default().with_format(AudioFormat::Wav);
            let result = provider
                .synthesize(&request(ProviderId::Groq, "Hello", &options))
                .await
                .unwrap();

            assert_eq!(result.mime_type(), "audio/wav");
        }
    }
}
