//! Infrastructure layer - Adapters for external systems
//!
//! Loads configuration, installs tracing and wires provider clients, wrapped
//! with timeout and retry, into the application's `SpeechService`.

pub mod adapters;
pub mod config;
pub mod retry;
pub mod telemetry;

pub use adapters::*;
pub use config::{AppConfig, LogFormat, ServerConfig};
pub use retry::{RetryConfig, RetryResult, Retryable, with_retry};
pub use telemetry::{DEFAULT_LOG_FILTER, TelemetryError, init_tracing};
