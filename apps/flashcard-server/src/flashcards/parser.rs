//! Model output parsing
//!
//! The model is asked for one `Front: Back` pair per line. Anything that
//! does not look like a pair is dropped rather than reported.

use super::types::Flashcard;

/// Parse newline-delimited `Front: Back` lines into flashcards.
///
/// Lines are split at the first colon only, so definitions may contain
/// colons of their own. Blank lines and lines without a colon are skipped.
pub fn parse_flashcards(raw: &str) -> Vec<Flashcard> {
    raw.split('\n')
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .filter_map(|line| line.split_once(':'))
        .map(|(front, back)| Flashcard::new(front.trim(), back.trim()))
        .collect()
}
