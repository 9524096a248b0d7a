//! Plain-text upload endpoint
//!
//! `POST /api/upload` reads the multipart field `file` and returns its
//! contents decoded as UTF-8 so the client can feed it to `/process`.

use axum::{
    extract::{
        multipart::{MultipartError, MultipartRejection},
        Multipart,
    },
    http::StatusCode,
    Json,
};
use serde::Serialize;

use crate::error::{AppError, Result};

#[derive(Debug, Serialize)]
pub struct UploadResponse {
    pub text: String,
}

pub async fn upload_text(
    multipart: std::result::Result<Multipart, MultipartRejection>,
) -> Result<Json<UploadResponse>> {
    let mut multipart = multipart
        .map_err(|e| AppError::Validation(format!("Invalid upload: {}", e.body_text())))?;

    while let Some(field) = multipart.next_field().await.map_err(read_error)? {
        if field.name() != Some("file") {
            continue;
        }

        let filename = field.file_name().unwrap_or("").to_string();
        let data = field.bytes().await.map_err(read_error)?;
        // Invalid sequences become U+FFFD rather than failing the upload
        let text = String::from_utf8_lossy(&data).into_owned();

        tracing::debug!(filename = %filename, bytes = data.len(), "Read uploaded text file");

        return Ok(Json(UploadResponse { text }));
    }

    Err(AppError::Validation("No file provided".to_string()))
}

fn read_error(e: MultipartError) -> AppError {
    if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::PayloadTooLarge(format!(
            "File too large. Maximum size is {} MiB",
            super::MAX_TEXT_UPLOAD_BYTES / (1024 * 1024)
        ))
    } else {
        AppError::Validation(format!("Failed to read upload: {}", e.body_text()))
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::http::StatusCode;
    use axum_test::multipart::{MultipartForm, Part};

    use crate::flashcards::MockProvider;
    use crate::routes::tests::server_with;

    #[tokio::test]
    async fn test_upload_returns_file_text() {
        let server = server_with(Arc::new(MockProvider::replying("")));
        let form = MultipartForm::new().add_part(
            "file",
            Part::bytes(b"Encoding: forming a memory code\n".to_vec())
                .file_name("notes.txt")
                .mime_type("text/plain"),
        );

        let response = server.post("/api/upload").multipart(form).await;

        response.assert_status_ok();
        let body: serde_json::Value = response.json();
        assert_eq!(body["text"], "Encoding: forming a memory code\n");
    }

    #[tokio::test]
    async fn test_invalid_utf8_is_replaced() {
        let server = server_with(Arc::new(MockProvider::replying("")));
        let form = MultipartForm::new().add_part(
            "file",
            Part::bytes(vec![b'o', b'k', 0xff]).file_name("notes.txt"),
        );

        let response = server.post("/api/upload").multipart(form).await;

        response.assert_status_ok();
        let body: serde_json::Value = response.json();
        assert_eq!(body["text"], "ok\u{FFFD}");
    }

    #[tokio::test]
    async fn test_missing_file_field_is_bad_request() {
        let server = server_with(Arc::new(MockProvider::replying("")));
        let form = MultipartForm::new().add_text("note", "not a file");

        let response = server.post("/api/upload").multipart(form).await;

        response.assert_status(StatusCode::BAD_REQUEST);
        let body: serde_json::Value = response.json();
        assert_eq!(body["error"], "No file provided");
    }
}
