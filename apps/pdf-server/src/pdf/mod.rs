//! PDF text extraction
//!
//! Opens an uploaded PDF with MuPDF, pulls plain text page by page and
//! joins the pages that produced any text.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use pdf_server::pdf::{EmptyTextPolicy, MupdfBackend, TextExtractor};
//!
//! let extractor = TextExtractor::new(Arc::new(MupdfBackend::new()), EmptyTextPolicy::Verbatim);
//! let result = extractor.extract(pdf_bytes).await?;
//! println!("{}", result.text);
//! ```

mod backend;
mod extractor;
mod types;

#[cfg(test)]
pub(crate) mod fixtures;

pub use backend::{MupdfBackend, PdfBackend};
pub use extractor::{assemble_text, TextExtractor};
pub use types::{EmptyTextPolicy, ExtractionResult, PdfError, NO_TEXT_PLACEHOLDER};
