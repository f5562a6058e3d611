//! Collected search results.

use std::slice;

use serde::Serialize;

use crate::{Cost, IndexError, NodeOffset, WordId};

/// A stored word found within the error budget.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Match {
    /// Caller-assigned id of the matched word.
    pub id: WordId,
    /// Total cost of turning the query into the word.
    pub error: Cost,
    /// Trie node where the word ends.
    #[serde(skip)]
    pub node: NodeOffset,
}

/// An ordered collection of matches.
///
/// Search appends in discovery order and then sorts ascending by error. The sort is stable,
/// so equal errors keep discovery order.
#[derive(Debug, Clone, Default)]
pub struct IndexMatches {
    /// Matches in their current order.
    matches: Vec<Match>,
}

impl IndexMatches {
    /// Creates an empty collector.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a match.
    pub fn add_match(&mut self, id: WordId, node: NodeOffset, error: Cost) {
        self.matches.push(Match { id, error, node });
    }

    /// Number of matches.
    pub fn len(&self) -> usize {
        self.matches.len()
    }

    /// Whether nothing matched.
    pub fn is_empty(&self) -> bool {
        self.matches.is_empty()
    }

    /// The `i`th match.
    pub fn get(&self, i: usize) -> Result<&Match, IndexError> {
        self.matches
            .get(i)
            .ok_or_else(|| IndexError::out_of_bounds("match", i, self.matches.len()))
    }

    /// Word id of the `i`th match.
    pub fn get_match(&self, i: usize) -> Result<WordId, IndexError> {
        self.get(i).map(|m| m.id)
    }

    /// Error of the `i`th match.
    pub fn get_match_error(&self, i: usize) -> Result<Cost, IndexError> {
        self.get(i).map(|m| m.error)
    }

    /// Terminal node of the `i`th match.
    pub fn get_node(&self, i: usize) -> Result<NodeOffset, IndexError> {
        self.get(i).map(|m| m.node)
    }

    /// Removes all matches, keeping the allocation.
    pub fn clear(&mut self) {
        self.matches.clear();
    }

    /// Sorts ascending by error, keeping the relative order of equal errors.
    pub fn sort(&mut self) {
        self.matches.sort_by_key(|m| m.error);
    }

    /// Iterates over the matches in order.
    pub fn iter(&self) -> slice::Iter<'_, Match> {
        self.matches.iter()
    }

    /// The matches as a slice.
    pub fn as_slice(&self) -> &[Match] {
        &self.matches
    }
}

impl<'a> IntoIterator for &'a IndexMatches {
    type Item = &'a Match;
    type IntoIter = slice::Iter<'a, Match>;

    fn into_iter(self) -> Self::IntoIter {
        self.matches.iter()
    }
}
