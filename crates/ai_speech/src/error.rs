//! Speech synthesis errors

use thiserror::Error;

use crate::profile::ProviderId;
use crate::types::AudioFormat;

/// Caller input rejected before any backend is contacted
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    /// No text to synthesize
    #[error("Input text is required and cannot be empty.")]
    EmptyInput,

    /// Text longer than the provider accepts
    #[error(
        "Processed text exceeds {} character limit for {provider} TTS ({actual} characters).",
        group_thousands(.limit)
    )]
    LengthExceeded {
        /// Provider whose limit was exceeded
        provider: ProviderId,
        /// Maximum characters the provider accepts
        limit: usize,
        /// Characters in the processed text
        actual: usize,
    },

    /// Speed outside the inclusive range the provider accepts
    #[error("Speed must be between {min} and {max:.1}.")]
    SpeedOutOfRange {
        /// Requested speed
        speed: f64,
        /// Lower bound (inclusive)
        min: f64,
        /// Upper bound (inclusive)
        max: f64,
    },

    /// Output encoding the provider cannot produce
    #[error("Audio format {format} is not supported by {provider}.")]
    UnsupportedFormat {
        provider: ProviderId,
        format: AudioFormat,
    },
}

/// Formats `10000` as `10,000`
fn group_thousands(value: impl std::fmt::Display) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

/// Errors raised by a provider client
#[derive(Debug, Error)]
pub enum SpeechError {
    /// Failed to connect to speech service
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// Request to speech service failed in transit
    #[error("Request failed: {0}")]
    RequestFailed(String),

    /// No response within the configured timeout
    #[error("Speech processing timeout after {0}ms")]
    Timeout(u64),

    /// The backend answered with a non-success status
    #[error("{provider} API error ({status}): {message}")]
    Api {
        /// Provider that rejected the request
        provider: ProviderId,
        /// HTTP status returned by the backend
        status: u16,
        /// Message extracted from the error body
        message: String,
        /// Raw error body
        body: String,
    },

    /// Response could not be read or decoded
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Invalid configuration
    #[error("Configuration error: {0}")]
    Configuration(String),
}

impl SpeechError {
    /// Map a transport error, recording the timeout that applied
    pub fn from_reqwest(err: &reqwest::Error, timeout_ms: u64) -> Self {
        if err.is_timeout() {
            Self::Timeout(timeout_ms)
        } else if err.is_connect() {
            Self::ConnectionFailed(err.to_string())
        } else {
            Self::RequestFailed(err.to_string())
        }
    }

    /// Backend HTTP status, when the backend answered
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Raw error detail for diagnostics
    pub fn details(&self) -> String {
        match self {
            Self::Api { body, .. } if !body.is_empty() => body.clone(),
            other => other.to_string(),
        }
    }

    /// Transport failures, timeouts and 5xx responses may succeed on retry
    pub const fn is_retryable(&self) -> bool {
        match self {
            Self::ConnectionFailed(_) | Self::RequestFailed(_) | Self::Timeout(_) => true,
            Self::Api { status, .. } => *status >= 500,
            Self::InvalidResponse(_) | Self::Configuration(_) => false,
        }
    }
}
