//! Flashcard generation
//!
//! Prompts a chat-completion model with the caller's notes and parses the
//! `Front: Back` lines it returns into [`Flashcard`] records.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use flashcard_server::flashcards::{FlashcardGenerator, OpenAiProvider};
//!
//! let provider = OpenAiProvider::new(&config.model)?;
//! let generator = FlashcardGenerator::new(Arc::new(provider));
//!
//! let cards = generator.generate("Encoding: forming a memory code").await?;
//! ```

mod generator;
mod parser;
mod provider;
mod types;

pub use generator::{FlashcardGenerator, SYSTEM_PROMPT};
pub use parser::parse_flashcards;
pub use provider::{CompletionProvider, OpenAiProvider};
pub use types::{CompletionError, Flashcard};

#[cfg(test)]
pub use provider::MockProvider;
