//! Error types for the leven-index crate.

use std::io;

use thiserror::Error;

use crate::WordId;

/// Errors that can occur when building or querying the index.
#[derive(Debug, Error)]
pub enum IndexError {
    /// Tried to create a word containing whitespace.
    #[error("tried to create a word with whitespace in it: {0:?}")]
    Whitespace(String),

    /// Tried to store the empty word in the trie.
    #[error("the empty word cannot be stored in the trie")]
    EmptyWord,

    /// The caller supplied the id reserved for "no word".
    #[error("word id {0} is reserved")]
    ReservedWordId(WordId),

    /// The same word text was inserted under two different ids.
    #[error("word '{word}' is already indexed with id {existing}, refusing id {requested}")]
    ConflictingWordId {
        /// The word being inserted.
        word: String,
        /// Id already stored for the word.
        existing: WordId,
        /// Id the caller tried to store.
        requested: WordId,
    },

    /// Checked access past the end of a sequence.
    #[error("tried to access {what} {index} out of bounds (size {len})")]
    OutOfBounds {
        /// What was being indexed.
        what: &'static str,
        /// Requested position.
        index: usize,
        /// Length of the sequence.
        len: usize,
    },

    /// A letter was assigned to two different equivalence groups.
    #[error("letter '{letter}' already belongs to a different error group")]
    GroupConflict {
        /// The conflicting letter.
        letter: char,
    },

    /// The trie backing region could not be grown.
    #[error("failed to grow trie storage to {requested} bytes: {source}")]
    Grow {
        /// Size of the mapping that could not be created.
        requested: usize,
        /// Underlying mapping error.
        source: io::Error,
    },

    /// A previous growth failure left the trie unusable.
    #[error("trie storage is unusable after a failed growth, rebuild the index")]
    Unusable,

    /// The trie structure contains an invalid offset, letter or cycle.
    #[error("trie structure corrupted: {0}")]
    Corrupted(String),
}

impl IndexError {
    /// Creates an `OutOfBounds` error.
    pub(crate) fn out_of_bounds(what: &'static str, index: usize, len: usize) -> Self {
        Self::OutOfBounds { what, index, len }
    }

    /// Creates a `Corrupted` error.
    pub(crate) fn corrupted(message: impl Into<String>) -> Self {
        Self::Corrupted(message.into())
    }
}
