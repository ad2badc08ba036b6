//! Types for speech synthesis
//!
//! Audio formats, caller options, validated requests and synthesized results.

use std::fmt;
use std::str::FromStr;

use bytes::Bytes;
use serde::{Deserialize, Serialize};

use crate::profile::ProviderId;

/// Audio encodings a provider may return
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AudioFormat {
    /// MP3 format
    Mp3,
    /// WAV format (uncompressed)
    Wav,
    /// Opus codec
    Opus,
    /// AAC format
    Aac,
    /// FLAC format (lossless)
    Flac,
}

impl AudioFormat {
    /// Get the MIME type for this audio format
    #[must_use]
    pub const fn mime_type(&self) -> &'static str {
        match self {
            Self::Mp3 => "audio/mpeg",
            Self::Wav => "audio/wav",
            Self::Opus => "audio/opus",
            Self::Aac => "audio/aac",
            Self::Flac => "audio/flac",
        }
    }

    /// Name used in request bodies and file extensions
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Mp3 => "mp3",
            Self::Wav => "wav",
            Self::Opus => "opus",
            Self::Aac => "aac",
            Self::Flac => "flac",
        }
    }
}

impl fmt::Display for AudioFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AudioFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "mp3" | "mpeg" => Ok(Self::Mp3),
            "wav" | "wave" => Ok(Self::Wav),
            "opus" => Ok(Self::Opus),
            "aac" => Ok(Self::Aac),
            "flac" => Ok(Self::Flac),
            other => Err(format!("Unknown audio format: {other}")),
        }
    }
}

/// Optional parameters supplied by the caller
///
/// Every field is optional; blank strings are treated as absent.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SynthesisOptions {
    pub voice: Option<String>,
    pub model: Option<String>,
    pub speed: Option<f64>,
    pub instructions: Option<String>,
    pub language_code: Option<String>,
    pub format: Option<AudioFormat>,
}

impl SynthesisOptions {
    #[must_use]
    pub fn with_voice(mut self, voice: impl Into<String>) -> Self {
        self.voice = Some(voice.into());
        self
    }

    #[must_use]
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    #[must_use]
    pub const fn with_speed(mut self, speed: f64) -> Self {
        self.speed = Some(speed);
        self
    }

    #[must_use]
    pub fn with_instructions(mut self, instructions: impl Into<String>) -> Self {
        self.instructions = Some(instructions.into());
        self
    }

    #[must_use]
    pub fn with_language_code(mut self, language_code: impl Into<String>) -> Self {
        self.language_code = Some(language_code.into());
        self
    }

    #[must_use]
    pub const fn with_format(mut self, format: AudioFormat) -> Self {
        self.format = Some(format);
        self
    }
}

/// A validated request for one provider
///
/// Built by [`ProviderProfile::prepare`](crate::ProviderProfile::prepare);
/// only carries fields the provider accepts.
#[derive(Debug, Clone, PartialEq)]
pub struct SynthesisRequest {
    pub(crate) provider: ProviderId,
    pub(crate) text: String,
    pub(crate) voice: String,
    pub(crate) model: Option<String>,
    pub(crate) speed: Option<f64>,
    pub(crate) instructions: Option<String>,
    pub(crate) language_code: Option<String>,
    pub(crate) format: AudioFormat,
}

impl SynthesisRequest {
    pub const fn provider(&self) -> ProviderId {
        self.provider
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn voice(&self) -> &str {
        &self.voice
    }

    pub fn model(&self) -> Option<&str> {
        self.model.as_deref()
    }

    pub const fn speed(&self) -> Option<f64> {
        self.speed
    }

    pub fn instructions(&self) -> Option<&str> {
        self.instructions.as_deref()
    }

    pub fn language_code(&self) -> Option<&str> {
        self.language_code.as_deref()
    }

    pub const fn format(&self) -> AudioFormat {
        self.format
    }
}

/// Audio returned by a provider
///
/// The bytes are opaque and passed through unchanged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SynthesisResult {
    audio: Bytes,
    format: AudioFormat,
    provider: ProviderId,
    voice: String,
    model: Option<String>,
}

impl SynthesisResult {
    /// Wrap audio produced for `request`
    pub fn new(audio: impl Into<Bytes>, format: AudioFormat, request: &SynthesisRequest) -> Self {
        Self {
            audio: audio.into(),
            format,
            provider: request.provider,
            voice: request.voice.clone(),
            model: request.model.clone(),
        }
    }

    pub const fn audio(&self) -> &Bytes {
        &self.audio
    }

    pub fn into_audio(self) -> Bytes {
        self.audio
    }

    pub const fn format(&self) -> AudioFormat {
        self.format
    }

    pub const fn mime_type(&self) -> &'static str {
        self.format.mime_type()
    }

    pub const fn provider(&self) -> ProviderId {
        self.provider
    }

    pub fn voice(&self) -> &str {
        &self.voice
    }

    pub fn model(&self) -> Option<&str> {
        self.model.as_deref()
    }

    pub fn size_bytes(&self) -> usize {
        self.audio.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mime_types() {
        assert_eq!(AudioFormat::Mp3.mime_type(), "audio/mpeg");
        assert_eq!(AudioFormat::Wav.mime_type(), "audio/wav");
        assert_eq!(AudioFormat::Opus.mime_type(), "audio/opus");
    }

    #[test]
    fn parses_formats() {
        assert_eq!("MP3".parse::<AudioFormat>(), Ok(AudioFormat::Mp3));
        assert_eq!(" wav ".parse::<AudioFormat>(), Ok(AudioFormat::Wav));
        assert!("ogg".parse::<AudioFormat>().is_err());
    }

    #[test]
    fn format_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&AudioFormat::Flac).unwrap(), "\"flac\"");
        let parsed: AudioFormat = serde_json::from_str("\"aac\"").unwrap();
        assert_eq!(parsed, AudioFormat::Aac);
    }

    #[test]
    fn options_builder() {
        let options = SynthesisOptions::default()
            .with_voice("nova")
            .with_speed(1.5)
            .with_format(AudioFormat::Wav);
        assert_eq!(options.voice.as_deref(), Some("nova"));
        assert_eq!(options.speed, Some(1.5));
        assert_eq!(options.format, Some(AudioFormat::Wav));
        assert!(options.model.is_none());
    }

    #[test]
    fn result_copies_request_identity() {
        let request = ProviderId::OpenAi
            .profile()
            .prepare("Hello", &SynthesisOptions::default().with_voice("echo"))
            .unwrap();
        let result = SynthesisResult::new(vec![1u8, 2, 3], AudioFormat::Mp3, &request);

        assert_eq!(result.provider(), ProviderId::OpenAi);
        assert_eq!(result.voice(), "echo");
        assert_eq!(result.model(), Some("tts-1"));
        assert_eq!(result.mime_type(), "audio/mpeg");
        assert_eq!(result.size_bytes(), 3);
    }
}
