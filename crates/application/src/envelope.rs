//! Response envelopes
//!
//! Every request ends in exactly one of two JSON shapes:
//!
//! ```json
//! { "success": true, "audioData": "<base64>", "mimeType": "audio/mpeg", ... }
//! { "success": false, "error": "...", "details": "..." }
//! ```

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use serde::Serialize;

use crate::error::ApplicationError;
use crate::services::SpeechOutcome;

/// Successful synthesis with base64 audio and diagnostic echo
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SuccessEnvelope {
    success: bool,
    pub audio_data: String,
    pub mime_type: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub original_text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub speakable_text: Option<String>,
    pub provider: &'static str,
    pub voice_used: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model_used: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instructions_used: Option<String>,
}

impl SuccessEnvelope {
    /// Build from a finished synthesis
    ///
    /// Without diagnostics the original and speakable text are left out.
    pub fn from_outcome(outcome: SpeechOutcome, include_diagnostics: bool) -> Self {
        let SpeechOutcome {
            original_text,
            speakable_text,
            result,
            instructions,
        } = outcome;

        let (original_text, speakable_text) = if include_diagnostics {
            (Some(original_text), Some(speakable_text.into_inner()))
        } else {
            (None, None)
        };

        Self {
            success: true,
            audio_data: STANDARD.encode(result.audio()),
            mime_type: result.mime_type(),
            original_text,
            speakable_text,
            provider: result.provider().as_str(),
            voice_used: result.voice().to_string(),
            model_used: result.model().map(ToString::to_string),
            instructions_used: instructions,
        }
    }
}

/// Failure with a readable message and the raw detail
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FailureEnvelope {
    success: bool,
    pub error: String,
    pub details: String,
}

impl FailureEnvelope {
    pub fn new(error: impl Into<String>, details: impl Into<String>) -> Self {
        Self {
            success: false,
            error: error.into(),
            details: details.into(),
        }
    }

    pub fn from_error(err: &ApplicationError) -> Self {
        Self::new(err.to_string(), err.details())
    }
}

#[cfg(test)]
mod tests {
    use ai_speech::{ProviderId, SpeechError, SynthesisOptions, SynthesisResult, ValidationError};
    use domain::SpeakableText;

    use super::*;

    fn outcome(provider: ProviderId, options: &SynthesisOptions) -> SpeechOutcome {
        let speakable = SpeakableText::from_markdown("# Title\n\nBody `x`").unwrap();
        let request = provider
            .profile()
            .prepare(speakable.as_str(), options)
            .unwrap();
        SpeechOutcome {
            original_text: "# Title\n\nBody `x`".to_string(),
            instructions: request.instructions().map(ToString::to_string),
            result: SynthesisResult::new(vec![0xFFu8, 0xFB, 0x90], request.format(), &request),
            speakable_text: speakable,
        }
    }

    #[test]
    fn success_shape() {
        let envelope = SuccessEnvelope::from_outcome(
            outcome(ProviderId::Groq, &SynthesisOptions::default()),
            true,
        );
        let json = serde_json::to_value(&envelope).unwrap();

        assert_eq!(
            json,
            serde_json::json!({
                "success": true,
                "audioData": "//uQ",
                "mimeType": "audio/mpeg",
                "originalText": "# Title\n\nBody `x`",
                "speakableText": "Title. Body",
                "provider": "groq",
                "voiceUsed": "Fritz-PlayAI",
                "modelUsed": "playai-tts"
            })
        );
    }

    #[test]
    fn diagnostics_can_be_dropped() {
        let envelope = SuccessEnvelope::from_outcome(
            outcome(ProviderId::Google, &SynthesisOptions::default()),
            false,
        );
        let json = serde_json::to_value(&envelope).unwrap();

        assert!(json.get("originalText").is_none());
        assert!(json.get("speakableText").is_none());
        assert!(json.get("modelUsed").is_none());
        assert_eq!(json["voiceUsed"], "en-US-Standard-A");
    }

    #[test]
    fn echoes_instructions() {
        let options = SynthesisOptions::default()
            .with_model("gpt-4o-mini-tts")
            .with_instructions("Whisper");
        let envelope = SuccessEnvelope::from_outcome(outcome(ProviderId::OpenAi, &options), true);

        assert_eq!(envelope.instructions_used.as_deref(), Some("Whisper"));
        assert_eq!(envelope.voice_used, "coral");
        assert_eq!(envelope.model_used.as_deref(), Some("gpt-4o-mini-tts"));
    }

    mod failures {
        use super::*;

        #[test]
        fn failure_shape() {
            let err = ApplicationError::from(ValidationError::EmptyInput);
            let json = serde_json::to_value(FailureEnvelope::from_error(&err)).unwrap();

            assert_eq!(
                json,
                serde_json::json!({
                    "success": false,
                    "error": "Input text is required and cannot be empty.",
                    "details": "Input text is required and cannot be empty."
                })
            );
        }

        #[test]
        fn provider_failure_keeps_raw_body() {
            let err = ApplicationError::from(SpeechError::Api {
                provider: ProviderId::OpenAi,
                status: 400,
                message: "Invalid voice".into(),
                body: r#"{"error":{"message":"Invalid voice"}}"#.into(),
            });
            let envelope = FailureEnvelope::from_error(&err);

            assert_eq!(envelope.error, "openai API error (400): Invalid voice");
            assert_eq!(envelope.details, r#"{"error":{"message":"Invalid voice"}}"#);
        }
    }
}
