//! Error tolerant word matching for leven.
//!
//! This crate stores a dictionary of words in a prefix trie and finds every stored word
//! whose weighted edit distance to a query stays within a budget. It handles:
//! - Words as whitespace-free letter sequences
//! - Configurable insertion, deletion, substitution and transposition costs, with pair
//!   overrides, equivalence groups and keyboard, keypad and accent presets
//! - A trie kept in a growable anonymous memory map, addressed by offsets
//! - Pruned depth first search producing matches sorted best first
//!
//! # Example
//!
//! ```
//! use leven_index::{CostModel, LevenshteinIndex, Word};
//!
//! let mut index = LevenshteinIndex::new(CostModel::default()).unwrap();
//! index.insert_word(&Word::new("abc").unwrap(), 1).unwrap();
//! index.insert_word(&Word::new("def").unwrap(), 2).unwrap();
//!
//! let matches = index.find_words(&Word::new("abd").unwrap(), 100).unwrap();
//! assert_eq!(matches.len(), 1);
//! assert_eq!(matches.get_match(0).unwrap(), 1);
//! assert_eq!(matches.get_match_error(0).unwrap(), 100);
//! ```

#![warn(missing_docs)]

mod cost;
mod distance;
mod error;
mod index;
mod matches;
mod row;
mod trie;
mod word;

pub use cost::{
    AccentGroup, Cost, CostConfig, CostModel, DEFAULT_ERROR, DEFAULT_GROUP_ERROR,
    DEFAULT_TYPO_ERROR, GroupId, NUMBERPAD_ADJACENT_ERROR, SUBSTRING_END_DELETION_ERROR,
    SUBSTRING_START_INSERTION_ERROR, SUBSTRING_START_LENGTH,
};
pub use distance::edit_distance;
pub use error::IndexError;
pub use index::LevenshteinIndex;
pub use matches::{IndexMatches, Match};
pub use trie::{EdgeOffset, Edges, NodeOffset, Trie};
pub use word::{Letter, Word};

/// Caller-assigned identifier of a stored word. `u32::MAX` is reserved.
pub type WordId = u32;
