//! Domain-level errors

use thiserror::Error;

/// Errors that can occur while turning markdown into speakable text
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    /// The document contained nothing that can be read aloud
    #[error("No speakable text found after cleaning markdown/code.")]
    NoSpeakableContent,
}
