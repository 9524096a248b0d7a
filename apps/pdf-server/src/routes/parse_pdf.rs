//! PDF text extraction endpoint
//!
//! `POST /api/parse-pdf` takes a multipart upload with the file in the
//! `pdf` field and answers with `{ "text": ... }`.
//!
//! Size and presence checks all run before the PDF library sees any bytes.

use axum::{
    body::Bytes,
    extract::{
        multipart::{MultipartError, MultipartRejection},
        Multipart, State,
    },
    http::{header, HeaderMap, StatusCode},
    Json,
};

use crate::error::{AppError, Result};
use crate::pdf::ExtractionResult;
use crate::state::AppState;

/// Form field carrying the document
pub const PDF_FIELD: &str = "pdf";

/// The `pdf` form field as received
struct PdfUpload {
    filename: Option<String>,
    data: Bytes,
}

pub async fn parse_pdf(
    State(state): State<AppState>,
    headers: HeaderMap,
    multipart: std::result::Result<Multipart, MultipartRejection>,
) -> Result<Json<ExtractionResult>> {
    let max_bytes = state.max_upload_bytes();

    if declared_length(&headers).is_some_and(|length| length > max_bytes as u64) {
        return Err(AppError::PayloadTooLarge { max_bytes });
    }

    let mut multipart = multipart.map_err(|e| {
        tracing::debug!("Upload is not a multipart form: {}", e);
        AppError::Validation("No PDF file provided".to_string())
    })?;

    let upload = read_pdf_field(&mut multipart, max_bytes)
        .await?
        .ok_or_else(|| AppError::Validation("No PDF file provided".to_string()))?;

    let filename = match upload.filename {
        Some(name) if !name.is_empty() => name,
        _ => return Err(AppError::Validation("No PDF file selected".to_string())),
    };

    let bytes = upload.data.len();
    let result = state.extractor().extract(upload.data.to_vec()).await?;

    tracing::info!(
        filename = %filename,
        bytes,
        chars = result.text.len(),
        "Extracted PDF text"
    );

    Ok(Json(result))
}

fn declared_length(headers: &HeaderMap) -> Option<u64> {
    headers
        .get(header::CONTENT_LENGTH)?
        .to_str()
        .ok()?
        .parse()
        .ok()
}

/// Skip form fields until the first `pdf` field and read its bytes.
///
/// The route's body limit cuts the read off with a 413 once the ceiling
/// is crossed.
async fn read_pdf_field(multipart: &mut Multipart, max_bytes: usize) -> Result<Option<PdfUpload>> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| multipart_error(e, max_bytes))?
    {
        if field.name() != Some(PDF_FIELD) {
            continue;
        }

        let filename = field.file_name().map(str::to_string);
        let data = field
            .bytes()
            .await
            .map_err(|e| multipart_error(e, max_bytes))?;

        return Ok(Some(PdfUpload { filename, data }));
    }

    Ok(None)
}

fn multipart_error(e: MultipartError, max_bytes: usize) -> AppError {
    if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::PayloadTooLarge { max_bytes }
    } else {
        AppError::Validation(format!("Failed to read upload: {}", e.body_text()))
    }
}
