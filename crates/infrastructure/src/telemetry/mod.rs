//! Logging and tracing setup
//!
//! Installs a `tracing` subscriber with an `EnvFilter` and either a text or a
//! JSON formatter.

mod subscriber;

pub use subscriber::{DEFAULT_LOG_FILTER, TelemetryError, init_tracing};
