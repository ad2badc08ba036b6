//! Application configuration
//!
//! Split into focused sub-modules:
//! - `server`: HTTP server settings
//!
//! Speech settings come from `ai_speech::SpeechConfig` and retry settings
//! from `crate::retry::RetryConfig`.
//!
//! Sources, later ones winning: built-in defaults, an optional `config.toml`
//! in the working directory, then `SPEAKMARK__*` environment variables
//! (e.g. `SPEAKMARK__SPEECH__OPENAI__API_KEY`).

mod server;

use ai_speech::{ProviderId, SpeechConfig};
use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::retry::RetryConfig;

pub use server::{LogFormat, ServerConfig};

/// Prefix for environment overrides
pub const ENV_PREFIX: &str = "SPEAKMARK";

/// Shared default for boolean `true` fields across config structs
pub(crate) const fn default_true() -> bool {
    true
}

/// Conventional credential variable read when the config has no key
pub const fn fallback_key_var(id: ProviderId) -> &'static str {
    match id {
        ProviderId::Groq => "GROQ_API_KEY",
        ProviderId::OpenAi => "OPENAI_API_KEY",
        ProviderId::Google => "GOOGLE_API_KEY",
    }
}

fn env_lookup(name: &str) -> Option<String> {
    std::env::var(name).ok()
}

/// Main application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Server configuration
    #[serde(default)]
    pub server: ServerConfig,

    /// Provider credentials, timeout and response options
    #[serde(default)]
    pub speech: SpeechConfig,

    /// Retry configuration for provider calls
    #[serde(default)]
    pub retry: RetryConfig,
}

impl AppConfig {
    /// Load configuration, using defaults when the sources are unreadable
    ///
    /// Fallback key variables apply either way. The load error is handed
    /// back so it can be logged once tracing is installed.
    pub fn load_or_default() -> (Self, Option<config::ConfigError>) {
        Self::with_fallbacks(Self::load_sources(), env_lookup)
    }

    fn with_fallbacks(
        loaded: Result<Self, config::ConfigError>,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> (Self, Option<config::ConfigError>) {
        let (mut config, error) = match loaded {
            Ok(config) => (config, None),
            Err(e) => (Self::default(), Some(e)),
        };
        config.apply_key_fallbacks(lookup);
        (config, error)
    }

    fn load_sources() -> Result<Self, config::ConfigError> {
        Self::load_from(
            config::File::with_name("config").required(false),
            Self::environment(),
        )
    }

    fn load_from(
        file: config::File<config::FileSourceFile, config::FileFormat>,
        env: config::Environment,
    ) -> Result<Self, config::ConfigError> {
        config::Config::builder()
            // Start with defaults
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 3000)?
            // Load from file if exists
            .add_source(file)
            // Override with environment variables (e.g., SPEAKMARK__SERVER__PORT)
            .add_source(env)
            .build()?
            .try_deserialize()
    }

    fn environment() -> config::Environment {
        config::Environment::with_prefix(ENV_PREFIX)
            .prefix_separator("__")
            .separator("__")
            .list_separator(",")
            .with_list_parse_key("server.allowed_origins")
            .try_parsing(true)
    }

    /// Fill missing API keys from the conventional provider variables
    ///
    /// Keys already present in the config are never overridden.
    pub fn apply_key_fallbacks(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        for id in ProviderId::ALL {
            let provider = self.speech.provider_mut(id);
            if provider.is_configured() {
                continue;
            }
            let var = fallback_key_var(id);
            if let Some(key) = lookup(var).filter(|key| !key.trim().is_empty()) {
                debug!(provider = %id, var, "Using API key from fallback variable");
                provider.api_key = Some(SecretString::from(key));
            }
        }
    }

    /// Check every section for invalid values
    pub fn validate(&self) -> Result<(), String> {
        self.server.validate()?;
        self.speech.validate()?;
        self.retry.validate()
    }
}
