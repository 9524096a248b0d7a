//! Route modules for the PDF Server

pub mod health;
pub mod parse_pdf;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use tower_http::trace::TraceLayer;

use crate::config::CorsConfig;
use crate::cors::cors_layer;
use crate::state::AppState;

/// Build the application router
pub fn build_router(state: AppState, cors: &CorsConfig) -> Router {
    let max_upload_bytes = state.max_upload_bytes();

    Router::new()
        .route("/api/health", get(health::health_check))
        .route(
            "/api/parse-pdf",
            post(parse_pdf::parse_pdf).layer(DefaultBodyLimit::max(max_upload_bytes)),
        )
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer(cors))
        .with_state(state)
}
