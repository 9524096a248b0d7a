//! Extraction policy
//!
//! Joins per-page text into one document string and applies the
//! configured [`EmptyTextPolicy`].

use std::sync::Arc;

use super::backend::PdfBackend;
use super::types::{EmptyTextPolicy, ExtractionResult, PdfError};

/// Concatenate the pages that produced text, each followed by a newline.
///
/// Pages without text (`None`, empty or whitespace-only) contribute nothing.
pub fn assemble_text(pages: &[Option<String>]) -> String {
    let mut text = String::new();

    for page in pages.iter().flatten() {
        if page.trim().is_empty() {
            continue;
        }
        text.push_str(page);
        text.push('\n');
    }

    text
}

/// Runs a [`PdfBackend`] off the async runtime and assembles its output
#[derive(Clone)]
pub struct TextExtractor {
    backend: Arc<dyn PdfBackend>,
    policy: EmptyTextPolicy,
}

impl TextExtractor {
    pub fn new(backend: Arc<dyn PdfBackend>, policy: EmptyTextPolicy) -> Self {
        Self { backend, policy }
    }

    pub fn policy(&self) -> EmptyTextPolicy {
        self.policy
    }

    /// Extract the text of `data`.
    ///
    /// A document that cannot be opened fails as a whole; no partial text is returned.
    pub async fn extract(&self, data: Vec<u8>) -> Result<ExtractionResult, PdfError> {
        let backend = Arc::clone(&self.backend);

        // MuPDF work is CPU-bound
        let pages = tokio::task::spawn_blocking(move || backend.extract_pages(&data))
            .await
            .map_err(|e| PdfError::Task(e.to_string()))??;

        let text = assemble_text(&pages);
        let pages_with_text = pages.iter().filter(|page| page.is_some()).count();

        tracing::debug!(
            pages = pages.len(),
            pages_with_text,
            chars = text.len(),
            "Assembled PDF text"
        );

        Ok(ExtractionResult {
            text: self.policy.apply(text),
        })
    }
}
