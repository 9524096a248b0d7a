//! Flashcard Server
//!
//! Turns free-text notes into front/back flashcards by prompting a
//! chat-completion model, and reads uploaded text files back as plain text.
//!
//! # Modules
//!
//! - `flashcards`: prompt, model provider and `Front: Back` parsing
//! - `routes`: HTTP handlers and router construction

pub mod config;
pub mod error;
pub mod flashcards;
pub mod routes;
pub mod state;

pub use routes::build_router;
