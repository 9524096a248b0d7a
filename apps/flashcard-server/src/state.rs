//! Application state management

use std::sync::Arc;

use crate::flashcards::FlashcardGenerator;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    generator: FlashcardGenerator,
    max_body_bytes: usize,
}

impl AppState {
    pub fn new(generator: FlashcardGenerator, max_body_bytes: usize) -> Self {
        Self {
            inner: Arc::new(AppStateInner {
                generator,
                max_body_bytes,
            }),
        }
    }

    /// Get the flashcard generator
    pub fn generator(&self) -> &FlashcardGenerator {
        &self.inner.generator
    }

    pub fn max_body_bytes(&self) -> usize {
        self.inner.max_body_bytes
    }
}
