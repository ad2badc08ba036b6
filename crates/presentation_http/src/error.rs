//! API error handling
//!
//! Every failure leaves the server as a `FailureEnvelope`:
//! `{"success": false, "error": ..., "details": ...}`. Only the HTTP status
//! differs between error kinds.

use ai_speech::SpeechError;
use application::{ApplicationError, FailureEnvelope};
use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;
use tracing::{error, warn};

/// API error type
#[derive(Debug, Error)]
pub enum ApiError {
    /// The pipeline rejected or failed the request
    #[error(transparent)]
    Application(#[from] ApplicationError),

    /// Body was not valid JSON for the endpoint
    #[error("Invalid request body")]
    MalformedBody(#[from] JsonRejection),
}

impl ApiError {
    /// HTTP status for this error
    pub fn status(&self) -> StatusCode {
        match self {
            Self::MalformedBody(rejection) => {
                // Oversized bodies keep their 413
                if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
                    StatusCode::PAYLOAD_TOO_LARGE
                } else {
                    StatusCode::BAD_REQUEST
                }
            },
            Self::Application(err) => match err {
                ApplicationError::Extraction(_) | ApplicationError::Validation(_) => {
                    StatusCode::BAD_REQUEST
                },
                ApplicationError::UnknownProvider(_) => StatusCode::NOT_FOUND,
                ApplicationError::ProviderNotConfigured(_) => StatusCode::SERVICE_UNAVAILABLE,
                ApplicationError::Provider(SpeechError::Api { status, .. }) => {
                    StatusCode::from_u16(*status)
                        .ok()
                        .filter(|s| s.is_client_error() || s.is_server_error())
                        .unwrap_or(StatusCode::BAD_GATEWAY)
                },
                ApplicationError::Provider(_) => StatusCode::INTERNAL_SERVER_ERROR,
            },
        }
    }

    /// Envelope body for this error
    pub fn envelope(&self) -> FailureEnvelope {
        match self {
            Self::Application(err) => FailureEnvelope::from_error(err),
            Self::MalformedBody(rejection) => {
                FailureEnvelope::new(self.to_string(), rejection.body_text())
            },
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            error!(status = status.as_u16(), error = %self, "Request failed");
        } else {
            warn!(status = status.as_u16(), error = %self, "Request rejected");
        }

        (status, Json(self.envelope())).into_response()
    }
}
