//! Provider profiles
//!
//! Static per-backend contracts: length ceiling, voice catalog, encodings
//! and which optional parameters the backend understands. A profile turns
//! speakable text plus caller options into a validated [`SynthesisRequest`].

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::ValidationError;
use crate::types::{AudioFormat, SynthesisOptions, SynthesisRequest};

/// Identifies a synthesis backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderId {
    /// Groq-hosted PlayAI voices
    Groq,
    /// OpenAI speech endpoint
    #[serde(rename = "openai")]
    OpenAi,
    /// Google Cloud Text-to-Speech
    Google,
}

impl ProviderId {
    /// All providers, in display order
    pub const ALL: [Self; 3] = [Self::Groq, Self::OpenAi, Self::Google];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Groq => "groq",
            Self::OpenAi => "openai",
            Self::Google => "google",
        }
    }

    /// The static profile for this provider
    pub const fn profile(self) -> &'static ProviderProfile {
        match self {
            Self::Groq => &GROQ,
            Self::OpenAi => &OPENAI,
            Self::Google => &GOOGLE,
        }
    }
}

impl fmt::Display for ProviderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProviderId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "groq" | "playai" => Ok(Self::Groq),
            "openai" | "open-ai" => Ok(Self::OpenAi),
            "google" | "vertex" | "gcp" => Ok(Self::Google),
            other => Err(format!("Unknown TTS provider: {other}")),
        }
    }
}

/// Inclusive speed bounds
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SpeedRange {
    pub min: f64,
    pub max: f64,
}

impl SpeedRange {
    /// Range shared by every backend that accepts speed
    pub const STANDARD: Self = Self { min: 0.25, max: 4.0 };

    pub fn contains(&self, speed: f64) -> bool {
        (self.min..=self.max).contains(&speed)
    }
}

/// Voices a provider knows about
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "voices", rename_all = "lowercase")]
pub enum VoiceCatalog {
    /// Any voice name may be sent; the list holds known examples
    Open(&'static [&'static str]),
    /// The provider documents exactly these voices
    Closed(&'static [&'static str]),
}

impl VoiceCatalog {
    pub const fn voices(&self) -> &'static [&'static str] {
        match self {
            Self::Open(voices) | Self::Closed(voices) => voices,
        }
    }

    /// Whether the catalog lists `voice`, or is open
    pub fn allows(&self, voice: &str) -> bool {
        match self {
            Self::Open(_) => true,
            Self::Closed(voices) => voices.contains(&voice),
        }
    }
}

/// Static contract of one backend
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProviderProfile {
    pub id: ProviderId,
    pub display_name: &'static str,
    /// Maximum input length in characters
    pub max_input_chars: usize,
    pub default_voice: &'static str,
    pub voices: VoiceCatalog,
    /// Model sent when the caller names none; `None` for backends without models
    pub default_model: Option<&'static str>,
    pub models: &'static [&'static str],
    /// Models whose default voice differs from `default_voice`
    #[serde(skip)]
    pub model_voice_defaults: &'static [(&'static str, &'static str)],
    pub encodings: &'static [AudioFormat],
    pub default_encoding: AudioFormat,
    /// Speed range, or `None` when speed is not accepted
    pub speed: Option<SpeedRange>,
    /// Models that honor style instructions; empty when instructions are not accepted
    pub instruction_models: &'static [&'static str],
    pub default_language_code: Option<&'static str>,
}

const ALL_SPEED: Option<SpeedRange> = Some(SpeedRange::STANDARD);

static GROQ: ProviderProfile = ProviderProfile {
    id: ProviderId::Groq,
    display_name: "Groq PlayAI",
    max_input_chars: 10_000,
    default_voice: "Fritz-PlayAI",
    voices: VoiceCatalog::Open(&[
        "Arista-PlayAI",
        "Atlas-PlayAI",
        "Basil-PlayAI",
        "Briggs-PlayAI",
        "Celeste-PlayAI",
        "Fritz-PlayAI",
        "Quinn-PlayAI",
        "Thunder-PlayAI",
    ]),
    default_model: Some("playai-tts"),
    models: &["playai-tts", "playai-tts-arabic"],
    model_voice_defaults: &[],
    encodings: &[AudioFormat::Mp3, AudioFormat::Wav],
    default_encoding: AudioFormat::Mp3,
    speed: None,
    instruction_models: &[],
    default_language_code: None,
};

static OPENAI: ProviderProfile = ProviderProfile {
    id: ProviderId::OpenAi,
    display_name: "OpenAI",
    max_input_chars: 4096,
    default_voice: "alloy",
    voices: VoiceCatalog::Closed(&["alloy", "echo", "fable", "onyx", "nova", "shimmer", "coral"]),
    default_model: Some("tts-1"),
    models: &["tts-1", "tts-1-hd", "gpt-4o-mini-tts"],
    model_voice_defaults: &[("gpt-4o-mini-tts", "coral")],
    encodings: &[
        AudioFormat::Mp3,
        AudioFormat::Wav,
        AudioFormat::Opus,
        AudioFormat::Aac,
        AudioFormat::Flac,
    ],
    default_encoding: AudioFormat::Mp3,
    speed: ALL_SPEED,
    instruction_models: &["gpt-4o-mini-tts"],
    default_language_code: None,
};

static GOOGLE: ProviderProfile = ProviderProfile {
    id: ProviderId::Google,
    display_name: "Google Cloud Text-to-Speech",
    max_input_chars: 5000,
    default_voice: "en-US-Standard-A",
    voices: VoiceCatalog::Open(&[
        "en-US-Standard-A",
        "en-US-Standard-B",
        "en-US-Standard-C",
        "en-US-Standard-D",
        "en-US-Standard-E",
        "en-US-Standard-F",
        "en-US-Standard-G",
        "en-US-Standard-H",
        "en-US-Standard-I",
        "en-US-Standard-J",
    ]),
    default_model: None,
    models: &[],
    model_voice_defaults: &[],
    encodings: &[AudioFormat::Mp3],
    default_encoding: AudioFormat::Mp3,
    speed: ALL_SPEED,
    instruction_models: &[],
    default_language_code: Some("en-US"),
};

fn non_blank(value: Option<&String>) -> Option<&str> {
    value.map(|s| s.trim()).filter(|s| !s.is_empty())
}

impl ProviderProfile {
    pub const fn accepts_model(&self) -> bool {
        self.default_model.is_some()
    }

    pub const fn accepts_speed(&self) -> bool {
        self.speed.is_some()
    }

    pub const fn accepts_instructions(&self) -> bool {
        !self.instruction_models.is_empty()
    }

    pub const fn accepts_language_code(&self) -> bool {
        self.default_language_code.is_some()
    }

    /// Whether the caller may choose among several encodings
    pub const fn selectable_encoding(&self) -> bool {
        self.encodings.len() > 1
    }

    /// Default voice for `model`, falling back to the profile default
    pub fn default_voice_for(&self, model: Option<&str>) -> &'static str {
        model
            .and_then(|model| {
                self.model_voice_defaults
                    .iter()
                    .find(|(m, _)| *m == model)
                    .map(|(_, voice)| *voice)
            })
            .unwrap_or(self.default_voice)
    }

    /// Validate text and options and build a request for this provider
    ///
    /// Checks run in order: empty text, length, speed, encoding. Voices and
    /// models are passed through verbatim; an unknown name only logs a
    /// warning since the backend is the authority on its catalog. Options the
    /// provider does not accept are dropped.
    pub fn prepare(
        &self,
        text: &str,
        options: &SynthesisOptions,
    ) -> Result<SynthesisRequest, ValidationError> {
        let text = text.trim();
        if text.is_empty() {
            return Err(ValidationError::EmptyInput);
        }

        let actual = text.chars().count();
        if actual > self.max_input_chars {
            return Err(ValidationError::LengthExceeded {
                provider: self.id,
                limit: self.max_input_chars,
                actual,
            });
        }

        let speed = match (options.speed, self.speed) {
            (Some(speed), Some(range)) if !range.contains(speed) => {
                return Err(ValidationError::SpeedOutOfRange {
                    speed,
                    min: range.min,
                    max: range.max,
                });
            },
            (Some(speed), Some(_)) => Some(speed),
            (Some(speed), None) => {
                debug!(provider = %self.id, speed, "Provider does not accept speed, ignoring");
                None
            },
            (None, _) => None,
        };

        let format = match options.format {
            Some(format) if !self.encodings.contains(&format) => {
                return Err(ValidationError::UnsupportedFormat {
                    provider: self.id,
                    format,
                });
            },
            Some(format) => format,
            None => self.default_encoding,
        };

        let model = self.resolve_model(non_blank(options.model.as_ref()));
        let voice = non_blank(options.voice.as_ref())
            .unwrap_or_else(|| self.default_voice_for(model.as_deref()))
            .to_string();
        if !self.voices.allows(&voice) {
            warn!(provider = %self.id, voice = %voice, "Voice not in provider catalog, passing through");
        }

        let instructions = self.resolve_instructions(
            non_blank(options.instructions.as_ref()),
            model.as_deref(),
        );

        let language_code = self.default_language_code.map(|default| {
            non_blank(options.language_code.as_ref())
                .unwrap_or(default)
                .to_string()
        });
        if language_code.is_none() && non_blank(options.language_code.as_ref()).is_some() {
            debug!(provider = %self.id, "Provider does not accept a language code, ignoring");
        }

        Ok(SynthesisRequest {
            provider: self.id,
            text: text.to_string(),
            voice,
            model,
            speed,
            instructions,
            language_code,
            format,
        })
    }

    fn resolve_model(&self, requested: Option<&str>) -> Option<String> {
        let Some(default) = self.default_model else {
            if requested.is_some() {
                debug!(provider = %self.id, "Provider does not accept a model, ignoring");
            }
            return None;
        };
        let model = requested.unwrap_or(default);
        if !self.models.contains(&model) {
            warn!(provider = %self.id, model, "Model not in provider catalog, passing through");
        }
        Some(model.to_string())
    }

    fn resolve_instructions(&self, requested: Option<&str>, model: Option<&str>) -> Option<String> {
        let instructions = requested?;
        if !self.accepts_instructions() {
            debug!(provider = %self.id, "Provider does not accept instructions, ignoring");
            return None;
        }
        if !model.is_some_and(|m| self.instruction_models.contains(&m)) {
            warn!(
                provider = %self.id,
                model = ?model,
                "Instructions are only honored by {:?}",
                self.instruction_models
            );
        }
        Some(instructions.to_string())
    }
}
