//! PDF extraction types

use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Text substituted for a textless PDF under [`EmptyTextPolicy::Placeholder`]
pub const NO_TEXT_PLACEHOLDER: &str = "No text extracted";

/// Extracted document text
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractionResult {
    pub text: String,
}

/// What to return when no page produced any text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EmptyTextPolicy {
    /// Return the assembled text as-is, empty string included
    #[default]
    Verbatim,
    /// Replace empty or whitespace-only text with [`NO_TEXT_PLACEHOLDER`]
    Placeholder,
}

impl EmptyTextPolicy {
    pub fn apply(self, text: String) -> String {
        match self {
            Self::Placeholder if text.trim().is_empty() => NO_TEXT_PLACEHOLDER.to_string(),
            _ => text,
        }
    }
}

impl FromStr for EmptyTextPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "verbatim" => Ok(Self::Verbatim),
            "placeholder" => Ok(Self::Placeholder),
            other => Err(format!("unknown empty text policy: {}", other)),
        }
    }
}

/// PDF extraction errors
#[derive(Debug, thiserror::Error)]
pub enum PdfError {
    /// The buffer could not be opened as a PDF at all
    #[error("Failed to parse PDF: {0}")]
    Parse(String),

    #[error("PDF extraction task failed: {0}")]
    Task(String),
}

impl From<mupdf::Error> for PdfError {
    fn from(e: mupdf::Error) -> Self {
        PdfError::Parse(e.to_string())
    }
}
