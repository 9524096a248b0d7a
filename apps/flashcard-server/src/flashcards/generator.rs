//! Flashcard generator
//!
//! One model call per request, then a line-oriented parse of the reply.

use std::sync::Arc;

use super::parser::parse_flashcards;
use super::provider::CompletionProvider;
use super::types::{CompletionError, Flashcard};

/// Fixed instruction sent ahead of the caller's notes
pub const SYSTEM_PROMPT: &str = "You are an expert on creating educational content. \
Convert the provided notes into key points that will be used for memorization and typing practice. \
Focus on the terms that have definitions. Each term should be one short sentence. \
Each exercise serves the purpose of a flashcard, so there is a front and back and the sentence structure is simple. \
The term title (front) comes before the text (back), and is in the format of Front: Back. \
Each flashcard should be on a newline. Make sure to cover every point in the text provided";

/// Turns notes into flashcards using a [`CompletionProvider`]
pub struct FlashcardGenerator {
    provider: Arc<dyn CompletionProvider>,
}

impl FlashcardGenerator {
    pub fn new(provider: Arc<dyn CompletionProvider>) -> Self {
        Self { provider }
    }

    /// Generate flashcards for `content`.
    ///
    /// A provider failure fails the whole call; no partial card list is returned.
    pub async fn generate(&self, content: &str) -> Result<Vec<Flashcard>, CompletionError> {
        let raw = self.provider.complete(SYSTEM_PROMPT, content).await?;
        let cards = parse_flashcards(&raw);

        tracing::debug!(
            response_chars = raw.len(),
            cards = cards.len(),
            "Parsed flashcards from model output"
        );

        Ok(cards)
    }
}
