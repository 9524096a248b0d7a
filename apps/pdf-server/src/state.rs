//! Application state management

use std::sync::Arc;

use crate::pdf::TextExtractor;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    extractor: TextExtractor,
    max_upload_bytes: usize,
}

impl AppState {
    pub fn new(extractor: TextExtractor, max_upload_bytes: usize) -> Self {
        Self {
            inner: Arc::new(AppStateInner {
                extractor,
                max_upload_bytes,
            }),
        }
    }

    /// Get the text extractor
    pub fn extractor(&self) -> &TextExtractor {
        &self.inner.extractor
    }

    /// Upload ceiling in bytes
    pub fn max_upload_bytes(&self) -> usize {
        self.inner.max_upload_bytes
    }
}
