//! Port definitions for speech synthesis
//!
//! Defines the trait (port) that provider clients implement.

use async_trait::async_trait;
#[cfg(test)]
use mockall::automock;

use crate::error::SpeechError;
use crate::profile::ProviderId;
use crate::types::{SynthesisRequest, SynthesisResult};

/// Port for Text-to-Speech (TTS) backends
///
/// Implementations are long-lived, stateless and shared across concurrent
/// requests. They receive requests already validated against the provider's
/// profile and return the backend's audio untouched.
///
/// # Example
///
/// ```ignore
/// use ai_speech::{ProviderId, SynthesisOptions, TextToSpeech};
///
/// async fn speak(tts: &dyn TextToSpeech, text: &str) -> Result<Vec<u8>, Box<dyn std::error::Error>> {
///     let request = tts.provider().profile().prepare(text, &SynthesisOptions::default())?;
///     let result = tts.synthesize(&request).await?;
///     Ok(result.into_audio().to_vec())
/// }
/// ```
#[cfg_attr(test, automock)]
#[async_trait]
pub trait TextToSpeech: Send + Sync {
    /// The backend this client talks to
    fn provider(&self) -> ProviderId;

    /// Synthesize speech for a validated request
    ///
    /// # Errors
    ///
    /// Returns `SpeechError` if the backend cannot be reached, rejects the
    /// request, or returns an unreadable response.
    async fn synthesize(&self, request: &SynthesisRequest) -> Result<SynthesisResult, SpeechError>;
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::types::{AudioFormat, SynthesisOptions};

    #[tokio::test]
    async fn mock_returns_audio_for_request() {
        let mut mock = MockTextToSpeech::new();
        mock.expect_provider().return_const(ProviderId::Groq);
        mock.expect_synthesize()
            .withf(|request| request.voice() == "Fritz-PlayAI")
            .times(1)
            .returning(|request| Ok(SynthesisResult::new(vec![9u8; 4], AudioFormat::Mp3, request)));

        let tts: Arc<dyn TextToSpeech> = Arc::new(mock);
        let request = tts
            .provider()
            .profile()
            .prepare("Hello", &SynthesisOptions::default())
            .unwrap();
        let result = tts.synthesize(&request).await.unwrap();

        assert_eq!(result.size_bytes(), 4);
        assert_eq!(result.provider(), ProviderId::Groq);
    }

    #[tokio::test]
    async fn mock_propagates_errors() {
        let mut mock = MockTextToSpeech::new();
        mock.expect_synthesize()
            .returning(|_| Err(SpeechError::Timeout(5)));

        let request = ProviderId::OpenAi
            .profile()
            .prepare("Hello", &SynthesisOptions::default())
            .unwrap();
        let err = mock.synthesize(&request).await.unwrap_err();
        assert!(err.is_retryable());
    }
}
