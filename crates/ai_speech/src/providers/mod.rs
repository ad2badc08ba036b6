//! Provider client implementations
//!
//! Contains concrete implementations of the `TextToSpeech` trait. Groq
//! exposes the OpenAI speech contract, so both share one client.

pub mod google;
pub mod openai;

use std::sync::Arc;
use std::time::Duration;

use bytes::Bytes;
use reqwest::{Client, Response};
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;

use crate::config::SpeechConfig;
use crate::error::SpeechError;
use crate::ports::TextToSpeech;
use crate::profile::ProviderId;

pub use google::GoogleSpeechProvider;
pub use openai::OpenAISpeechProvider;

/// Build the client for `id` from configuration
///
/// # Errors
///
/// Returns `SpeechError::Configuration` if the provider has no API key or
/// the HTTP client cannot be created.
pub fn build_provider(
    id: ProviderId,
    config: &SpeechConfig,
) -> Result<Arc<dyn TextToSpeech>, SpeechError> {
    Ok(match id {
        ProviderId::Groq => Arc::new(OpenAISpeechProvider::groq(config)?),
        ProviderId::OpenAi => Arc::new(OpenAISpeechProvider::openai(config)?),
        ProviderId::Google => Arc::new(GoogleSpeechProvider::new(config)?),
    })
}

/// Connection settings shared by every HTTP-backed provider
#[derive(Clone)]
pub(crate) struct HttpBackend {
    pub(crate) client: Client,
    pub(crate) endpoint: String,
    pub(crate) api_key: SecretString,
    pub(crate) timeout_ms: u64,
}

impl std::fmt::Debug for HttpBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpBackend")
            .field("endpoint", &self.endpoint)
            .field("api_key", &"[REDACTED]")
            .field("timeout_ms", &self.timeout_ms)
            .finish_non_exhaustive()
    }
}

impl HttpBackend {
    pub(crate) fn new(id: ProviderId, config: &SpeechConfig) -> Result<Self, SpeechError> {
        config.validate().map_err(SpeechError::Configuration)?;

        let provider_config = config.provider(id);
        let api_key = provider_config
            .api_key
            .clone()
            .filter(|_| provider_config.is_configured())
            .ok_or_else(|| SpeechError::Configuration(format!("{id} API key is not configured")))?;

        let client = Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .build()
            .map_err(|e| {
                SpeechError::Configuration(format!("Failed to create HTTP client: {e}"))
            })?;

        Ok(Self {
            client,
            endpoint: config.endpoint(id).to_string(),
            api_key,
            timeout_ms: config.timeout_ms,
        })
    }

    pub(crate) fn key(&self) -> &str {
        self.api_key.expose_secret()
    }

    pub(crate) fn transport_error(&self, err: &reqwest::Error) -> SpeechError {
        SpeechError::from_reqwest(err, self.timeout_ms)
    }

    /// Read a successful body as bytes
    pub(crate) async fn read_bytes(&self, response: Response) -> Result<Bytes, SpeechError> {
        response.bytes().await.map_err(|e| {
            if e.is_timeout() {
                SpeechError::Timeout(self.timeout_ms)
            } else {
                SpeechError::InvalidResponse(format!("Failed to read audio: {e}"))
            }
        })
    }
}

/// Error body shape shared by the OpenAI, Groq and Google APIs
#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    error: ApiErrorDetail,
}

#[derive(Debug, Deserialize)]
struct ApiErrorDetail {
    message: String,
}

/// Turn a non-success response into `SpeechError::Api`
pub(crate) async fn api_error(provider: ProviderId, response: Response) -> SpeechError {
    let status = response.status();
    let body = response.text().await.unwrap_or_default();
    let message = parse_error_message(&body).unwrap_or_else(|| {
        status
            .canonical_reason()
            .map_or_else(|| format!("HTTP {}", status.as_u16()), ToString::to_string)
    });

    SpeechError::Api {
        provider,
        status: status.as_u16(),
        message,
        body,
    }
}

fn parse_error_message(body: &str) -> Option<String> {
    serde_json::from_str::<ApiErrorBody>(body)
        .ok()
        .map(|parsed| parsed.error.message)
        .filter(|message| !message.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_nested_error_message() {
        let body = r#"{"error":{"message":"Invalid voice","type":"invalid_request_error"}}"#;
        assert_eq!(parse_error_message(body), Some("Invalid voice".to_string()));

        let google = r#"{"error":{"code":400,"message":"Bad rate","status":"INVALID_ARGUMENT"}}"#;
        assert_eq!(parse_error_message(google), Some("Bad rate".to_string()));
    }

    #[test]
    fn unparseable_error_body() {
        assert_eq!(parse_error_message("<html>oops</html>"), None);
        assert_eq!(parse_error_message(r#"{"error":{"message":""}}"#), None);
    }

    #[test]
    fn build_provider_requires_key() {
        let config = SpeechConfig::default();
        for id in ProviderId::ALL {
            assert!(matches!(
                build_provider(id, &config),
                Err(SpeechError::Configuration(_))
            ));
        }
    }

    #[test]
    fn build_provider_reports_its_id() {
        let mut config = SpeechConfig::default();
        for id in ProviderId::ALL {
            config.provider_mut(id).api_key = Some(SecretString::from("key"));
        }
        for id in ProviderId::ALL {
            assert_eq!(build_provider(id, &config).unwrap().provider(), id);
        }
    }

    #[test]
    fn backend_debug_hides_key() {
        let mut config = SpeechConfig::default();
        config.openai.api_key = Some(SecretString::from("sk-hidden"));
        let backend = HttpBackend::new(ProviderId::OpenAi, &config).unwrap();
        let debug = format!("{backend:?}");
        assert!(!debug.contains("sk-hidden"));
        assert_eq!(backend.key(), "sk-hidden");
    }
}
