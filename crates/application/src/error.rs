//! Application-level errors

use ai_speech::{ProviderId, SpeechError, ValidationError};
use domain::DomainError;
use thiserror::Error;

/// Errors that can occur while turning markdown into speech
#[derive(Debug, Error)]
pub enum ApplicationError {
    /// The document had nothing to read aloud
    #[error(transparent)]
    Extraction(#[from] DomainError),

    /// Caller input rejected before dispatch
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The backend call failed
    #[error(transparent)]
    Provider(#[from] SpeechError),

    /// No provider by this name
    #[error("Unknown TTS provider: {0}")]
    UnknownProvider(String),

    /// Provider known but no client registered (missing credentials)
    #[error("TTS provider {0} is not configured")]
    ProviderNotConfigured(ProviderId),
}

impl ApplicationError {
    /// Raw error detail, the backend body when one exists
    pub fn details(&self) -> String {
        match self {
            Self::Provider(err) => err.details(),
            other => other.to_string(),
        }
    }
}
