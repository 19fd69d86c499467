//! Error types for filterfix-edit.
//!
//! A fix that cannot be located in the text it was computed for means the engine and the file on
//! disk disagree; that is reported rather than guessed around.

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EditError {
    /// A fix range reaches past the end of the text.
    #[error("fix range [{start}, {end}) is out of bounds for text of {len} UTF-16 units")]
    OutOfBounds { start: i64, end: i64, len: usize },

    /// A fix offset falls between the two halves of a surrogate pair.
    #[error("fix offset {offset} splits a character")]
    SplitsCharacter { offset: usize },
}

/// Result type alias using EditError.
pub type EditResult<T> = Result<T, EditError>;
