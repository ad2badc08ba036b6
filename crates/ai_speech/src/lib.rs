//! AI Speech - Text-to-Speech provider abstractions
//!
//! Provides the provider contracts and clients speakmark synthesizes with:
//! - `ProviderProfile` - static per-backend limits, voices and parameters
//! - `TextToSpeech` - port implemented by every backend client
//!
//! # Architecture
//!
//! This crate follows the ports & adapters pattern:
//! - `profile` validates caller input into a `SynthesisRequest`
//! - `ports` module defines the trait (port)
//! - `providers` module contains concrete implementations (adapters)
//!
//! # Supported Providers
//!
//! - Groq (PlayAI voices), 10,000 characters
//! - OpenAI speech, 4,096 characters
//! - Google Cloud Text-to-Speech, 5,000 characters
//!
//! # Example
//!
//! ```ignore
//! use ai_speech::{ProviderId, SpeechConfig, SynthesisOptions, build_provider};
//!
//! let tts = build_provider(ProviderId::OpenAi, &config)?;
//! let request = ProviderId::OpenAi
//!     .profile()
//!     .prepare("Hello, world!", &SynthesisOptions::default().with_voice("nova"))?;
//! let result = tts.synthesize(&request).await?;
//! ```

pub mod config;
pub mod error;
pub mod ports;
pub mod profile;
pub mod providers;
pub mod types;

pub use config::{ProviderConfig, SpeechConfig};
pub use error::{SpeechError, ValidationError};
pub use ports::TextToSpeech;
pub use profile::{ProviderId, ProviderProfile, SpeedRange, VoiceCatalog};
pub use providers::{GoogleSpeechProvider, OpenAISpeechProvider, build_provider};
pub use types::{AudioFormat, SynthesisOptions, SynthesisRequest, SynthesisResult};
