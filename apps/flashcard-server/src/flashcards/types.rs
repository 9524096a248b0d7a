//! Flashcard types

use serde::{Deserialize, Serialize};

/// A single term/definition pair
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Flashcard {
    pub front: String,
    pub back: String,
}

impl Flashcard {
    pub fn new(front: impl Into<String>, back: impl Into<String>) -> Self {
        Self {
            front: front.into(),
            back: back.into(),
        }
    }
}

/// Completion model errors
#[derive(Debug, thiserror::Error)]
pub enum CompletionError {
    #[error("Missing OpenAI API key")]
    MissingApiKey,

    #[error("Failed to build HTTP client: {0}")]
    Client(String),

    #[error("Model request timed out after {0} seconds")]
    Timeout(u64),

    #[error("Failed to call model API: {0}")]
    Network(String),

    #[error("Model API returned {status}: {body}")]
    Api { status: u16, body: String },

    #[error("Invalid response from model API: {0}")]
    InvalidResponse(String),
}
