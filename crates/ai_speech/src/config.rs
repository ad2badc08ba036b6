//! Configuration for speech synthesis

use std::fmt;

use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

use crate::profile::ProviderId;

/// Credentials and endpoint override for one backend
#[derive(Clone, Default, Serialize, Deserialize)]
pub struct ProviderConfig {
    /// API key (sensitive - uses SecretString)
    #[serde(default, skip_serializing)]
    pub api_key: Option<SecretString>,

    /// Full URL of the synthesis endpoint (provider default when unset)
    #[serde(default)]
    pub endpoint: Option<String>,
}

impl ProviderConfig {
    /// Whether a non-empty API key is present
    pub fn is_configured(&self) -> bool {
        self.api_key
            .as_ref()
            .is_some_and(|key| !key.expose_secret().trim().is_empty())
    }
}

impl fmt::Debug for ProviderConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProviderConfig")
            .field(
                "api_key",
                &if self.api_key.is_some() {
                    Some("[REDACTED]")
                } else {
                    None
                },
            )
            .field("endpoint", &self.endpoint)
            .finish()
    }
}

/// Configuration for speech synthesis services
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpeechConfig {
    /// Groq (PlayAI voices)
    #[serde(default)]
    pub groq: ProviderConfig,

    /// OpenAI speech endpoint
    #[serde(default)]
    pub openai: ProviderConfig,

    /// Google Cloud Text-to-Speech
    #[serde(default)]
    pub google: ProviderConfig,

    /// Per-attempt request timeout in milliseconds
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,

    /// Echo original and speakable text in success responses
    #[serde(default = "default_include_diagnostics")]
    pub include_diagnostics: bool,
}

/// Public endpoint of each backend
pub const fn default_endpoint(id: ProviderId) -> &'static str {
    match id {
        ProviderId::Groq => "https://api.groq.com/openai/v1/audio/speech",
        ProviderId::OpenAi => "https://api.openai.com/v1/audio/speech",
        ProviderId::Google => "https://texttospeech.googleapis.com/v1/text:synthesize",
    }
}

const fn default_timeout_ms() -> u64 {
    30000 // 30 seconds
}

const fn default_include_diagnostics() -> bool {
    true
}

impl Default for SpeechConfig {
    fn default() -> Self {
        Self {
            groq: ProviderConfig::default(),
            openai: ProviderConfig::default(),
            google: ProviderConfig::default(),
            timeout_ms: default_timeout_ms(),
            include_diagnostics: default_include_diagnostics(),
        }
    }
}

impl SpeechConfig {
    /// Settings for one provider
    pub const fn provider(&self, id: ProviderId) -> &ProviderConfig {
        match id {
            ProviderId::Groq => &self.groq,
            ProviderId::OpenAi => &self.openai,
            ProviderId::Google => &self.google,
        }
    }

    /// Mutable settings for one provider
    pub const fn provider_mut(&mut self, id: ProviderId) -> &mut ProviderConfig {
        match id {
            ProviderId::Groq => &mut self.groq,
            ProviderId::OpenAi => &mut self.openai,
            ProviderId::Google => &mut self.google,
        }
    }

    /// Endpoint for one provider, honoring overrides
    pub fn endpoint(&self, id: ProviderId) -> &str {
        self.provider(id)
            .endpoint
            .as_deref()
            .unwrap_or_else(|| default_endpoint(id))
    }

    /// Providers that have an API key
    pub fn configured_providers(&self) -> Vec<ProviderId> {
        ProviderId::ALL
            .into_iter()
            .filter(|id| self.provider(*id).is_configured())
            .collect()
    }

    /// Validate the configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    pub fn validate(&self) -> Result<(), String> {
        if self.timeout_ms == 0 {
            return Err("Timeout must be greater than 0".to_string());
        }

        for id in ProviderId::ALL {
            let endpoint = self.endpoint(id);
            if !endpoint.starts_with("http://") && !endpoint.starts_with("https://") {
                return Err(format!("Invalid {id} endpoint: {endpoint}"));
            }
        }

        Ok(())
    }
}
