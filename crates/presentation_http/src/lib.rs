//! speakmark HTTP presentation layer
//!
//! Serves the markdown to speech pipeline over HTTP. Every synthesis request
//! answers with a success or failure envelope.

pub mod error;
pub mod handlers;
pub mod routes;
pub mod state;

pub use error::ApiError;
pub use routes::create_router;
pub use state::AppState;
