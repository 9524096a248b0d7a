//! Route modules for the Flashcard Server

pub mod health;
pub mod process;
pub mod upload;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// Largest text file accepted by `/api/upload`
pub const MAX_TEXT_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

/// Build the application router
pub fn build_router(state: AppState) -> Router {
    let max_body_bytes = state.max_body_bytes();

    Router::new()
        .route("/health", get(health::health_check))
        .route(
            "/process",
            post(process::process).layer(DefaultBodyLimit::max(max_body_bytes)),
        )
        .route(
            "/api/upload",
            post(upload::upload_text).layer(DefaultBodyLimit::max(MAX_TEXT_UPLOAD_BYTES)),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
