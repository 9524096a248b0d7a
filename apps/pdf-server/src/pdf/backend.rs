//! PDF backends
//!
//! [`PdfBackend`] hides the PDF library behind a per-page text interface so
//! the extraction policy and the HTTP layer can be exercised without it.

use mupdf::{Document, Page, TextPageOptions};

use super::types::PdfError;

/// Page-oriented text source
pub trait PdfBackend: Send + Sync {
    /// Extract text for every page in ascending page order.
    ///
    /// `None` marks a page that yielded no text. Only a document that cannot
    /// be opened at all is an error.
    fn extract_pages(&self, data: &[u8]) -> Result<Vec<Option<String>>, PdfError>;
}

/// MuPDF-based implementation of [`PdfBackend`]
#[derive(Debug, Default, Clone, Copy)]
pub struct MupdfBackend;

impl MupdfBackend {
    pub fn new() -> Self {
        Self
    }
}

impl PdfBackend for MupdfBackend {
    fn extract_pages(&self, data: &[u8]) -> Result<Vec<Option<String>>, PdfError> {
        if !has_pdf_header(data) {
            return Err(PdfError::Parse("no PDF header found".to_string()));
        }

        let document = Document::from_bytes(data, "application/pdf")?;

        if document.needs_password()? {
            return Err(PdfError::Parse("document is encrypted".to_string()));
        }

        let page_count = document.page_count()?;
        let mut pages = Vec::with_capacity(page_count.max(0) as usize);

        for page_index in 0..page_count {
            let text = document
                .load_page(page_index)
                .and_then(|page| page_text(&page));

            match text {
                Ok(text) if !text.trim().is_empty() => pages.push(Some(text)),
                Ok(_) => pages.push(None),
                Err(e) => {
                    tracing::warn!(page = page_index, error = %e, "Skipping unreadable page");
                    pages.push(None);
                }
            }
        }

        Ok(pages)
    }
}

/// Plain text of one page, one output line per text line
fn page_text(page: &Page) -> Result<String, mupdf::Error> {
    let text_page = page.to_text_page(TextPageOptions::empty())?;
    let mut text = String::new();

    for block in text_page.blocks() {
        for line in block.lines() {
            text.extend(line.chars().filter_map(|ch| ch.char()));
            text.push('\n');
        }
    }

    text.truncate(text.trim_end().len());
    Ok(text)
}

/// PDF readers accept the `%PDF-` marker anywhere in the first kilobyte
fn has_pdf_header(data: &[u8]) -> bool {
    let head = &data[..data.len().min(1024)];
    head.windows(5).any(|window| window == b"%PDF-")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pdf::fixtures::build_pdf;

    #[test]
    fn test_pages_in_order() {
        let pdf = build_pdf(&[Some("Alpha"), Some("Bravo"), Some("Charlie")]);

        let pages = MupdfBackend::new().extract_pages(&pdf).unwrap();

        assert_eq!(
            pages,
            vec![
                Some("Alpha".to_string()),
                Some("Bravo".to_string()),
                Some("Charlie".to_string()),
            ]
        );
    }

    #[test]
    fn test_blank_page_yields_none() {
        let pdf = build_pdf(&[None, Some("Bravo")]);

        let pages = MupdfBackend::new().extract_pages(&pdf).unwrap();

        assert_eq!(pages, vec![None, Some("Bravo".to_string())]);
    }

    #[test]
    fn test_non_pdf_bytes_are_rejected() {
        let result = MupdfBackend::new().extract_pages(b"just some plain text, not a document");

        assert!(matches!(result, Err(PdfError::Parse(_))));
    }

    #[test]
    fn test_header_detection() {
        assert!(has_pdf_header(b"%PDF-1.7\n"));
        assert!(has_pdf_header(b"\xef\xbb\xbf%PDF-1.4"));
        assert!(!has_pdf_header(b"PK\x03\x04"));
        assert!(!has_pdf_header(b""));
    }
}
