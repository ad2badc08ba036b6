//! Application layer - Use cases and orchestration
//!
//! Runs the markdown to speech pipeline and shapes its outcome into the
//! response envelopes handed back to callers.

pub mod envelope;
pub mod error;
pub mod services;

pub use envelope::{FailureEnvelope, SuccessEnvelope};
pub use error::ApplicationError;
pub use services::*;
