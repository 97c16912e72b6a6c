//! Error and diagnostic types for spellbook data.

use thiserror::Error;

use crate::gesture::GestureSequence;

/// Errors that can occur when loading a spellbook file.
#[derive(Debug, Error)]
pub enum SpellBookError {
    /// File could not be found.
    #[error("File not found: {0}")]
    FileNotFound(String),

    /// File could not be read.
    #[error("Failed to read file '{path}': {details}")]
    ReadError { path: String, details: String },

    /// RON parsing failed.
    #[error("Parse error in '{path}': {details}")]
    ParseError { path: String, details: String },
}

/// Configuration problems found while validating a spellbook.
///
/// None of these stop the book from being used.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SpellBookIssue {
    /// Two entries share the same sequence. Lookups return the first.
    #[error("Duplicate gesture sequence at entry {duplicate} (already used by entry {first}): {sequence}")]
    DuplicateSequence {
        first: usize,
        duplicate: usize,
        sequence: GestureSequence,
    },

    /// An entry with no steps can never be matched.
    #[error("Entry {index} has an empty gesture sequence")]
    EmptySequence { index: usize },

    /// An entry containing a step with a missing hand can never be matched.
    #[error("Entry {index} contains a step with no hand and can never be cast: {sequence}")]
    UnreachableStep { index: usize, sequence: GestureSequence },
}
