//! Flashcard processing endpoint
//!
//! `POST /process` takes `{ "content": string }` and answers with the
//! flashcards the model produced for it.

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    Json,
};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{AppError, Result};
use crate::flashcards::Flashcard;
use crate::state::AppState;

/// Request body. `content` stays loosely typed so a wrong type is
/// reported as a validation error instead of a deserialization failure.
#[derive(Debug, Deserialize)]
pub struct ProcessRequest {
    #[serde(default)]
    pub content: Option<Value>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessResponse {
    pub success: bool,
    pub flashcards: Vec<Flashcard>,
    pub quiz_id: String,
}

pub async fn process(
    State(state): State<AppState>,
    payload: std::result::Result<Json<ProcessRequest>, JsonRejection>,
) -> Result<Json<ProcessResponse>> {
    let Json(request) = payload.map_err(|e| {
        if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
            AppError::PayloadTooLarge(format!(
                "Request body too large. Maximum size is {} bytes",
                state.max_body_bytes()
            ))
        } else {
            AppError::Validation(format!("Invalid request body: {}", e.body_text()))
        }
    })?;

    let content = match request.content {
        None => {
            return Err(AppError::Validation("No content provided".to_string()))
        }
        Some(Value::String(content)) => content,
        Some(_) => return Err(AppError::Validation("Invalid content provided".to_string())),
    };

    if content.trim().is_empty() {
        return Err(AppError::Validation("No content provided".to_string()));
    }

    tracing::info!(content_chars = content.len(), "Processing content");

    let flashcards = state.generator().generate(&content).await?;

    tracing::info!(cards = flashcards.len(), "Generated flashcards");

    Ok(Json(ProcessResponse {
        success: true,
        flashcards,
        quiz_id: quiz_id(),
    }))
}

/// Demo quiz identifier derived from the current time
fn quiz_id() -> String {
    format!("demo-{}", Utc::now().timestamp_millis())
}
