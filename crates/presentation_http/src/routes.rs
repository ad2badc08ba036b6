//! Route definitions

use axum::{
    Router,
    extract::DefaultBodyLimit,
    routing::get,
};

use crate::{handlers, state::AppState};

/// Create the main router with all routes
pub fn create_router(state: AppState) -> Router {
    let body_limit = state.config.server.max_body_size_json_bytes;

    Router::new()
        // Health and status endpoints
        .route("/health", get(handlers::health::health_check))
        .route("/ready", get(handlers::health::readiness_check))
        // Text-to-speech
        .route("/tts/providers", get(handlers::tts::list_providers))
        .route(
            "/tts/{provider}",
            get(handlers::tts::describe_provider).post(handlers::tts::synthesize),
        )
        // Oversized bodies surface as JSON rejections, so they get an envelope too
        .layer(DefaultBodyLimit::max(body_limit))
        // Attach state
        .with_state(state)
}
