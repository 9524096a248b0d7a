//! Error types for the PDF Server

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

use crate::pdf::PdfError;

/// Application-wide result type
pub type Result<T> = std::result::Result<T, AppError>;

/// Application error type
#[derive(Error, Debug)]
pub enum AppError {
    /// Missing or malformed upload
    #[error("{0}")]
    Validation(String),

    #[error("File too large. Maximum size is {}", display_size(.max_bytes))]
    PayloadTooLarge { max_bytes: usize },

    #[error(transparent)]
    Pdf(#[from] PdfError),
}

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::PayloadTooLarge { .. } => StatusCode::PAYLOAD_TOO_LARGE,
            AppError::Pdf(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// Human-readable upload ceiling
pub fn format_size(bytes: usize) -> String {
    const MIB: usize = 1024 * 1024;
    const KIB: usize = 1024;

    if bytes >= MIB && bytes % MIB == 0 {
        format!("{} MiB", bytes / MIB)
    } else if bytes >= KIB && bytes % KIB == 0 {
        format!("{} KiB", bytes / KIB)
    } else {
        format!("{} bytes", bytes)
    }
}

fn display_size(bytes: &usize) -> String {
    format_size(*bytes)
}

/// Error response body
#[derive(Serialize)]
struct ErrorResponse {
    error: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        match &self {
            AppError::Pdf(PdfError::Parse(msg)) => tracing::error!("PDF parse error: {}", msg),
            AppError::Pdf(e) => tracing::error!("PDF extraction error: {}", e),
            other => tracing::warn!("Rejected upload: {}", other),
        }

        let body = Json(ErrorResponse {
            error: self.to_string(),
        });

        (status, body).into_response()
    }
}
