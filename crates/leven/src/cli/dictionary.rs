//! Word lists read from disk.
//!
//! A dictionary file holds words separated by whitespace. Lines whose first non-blank
//! character is `#` are comments. Each distinct word gets an id on first appearance, so equal
//! words always share an id and repeated words raise their insertion count.

use std::{
    collections::HashMap,
    fs, io,
    path::{Path, PathBuf},
};

use leven_index::{CostModel, IndexError, LevenshteinIndex, Word, WordId};
use thiserror::Error;
use tracing::debug;

/// Errors from loading a dictionary.
#[derive(Debug, Error)]
pub enum DictionaryError {
    /// The file could not be read.
    #[error("failed to read dictionary {path}: {source}")]
    Read {
        /// Path of the dictionary file.
        path: PathBuf,
        /// Underlying I/O error.
        source: io::Error,
    },

    /// More distinct words than ids.
    #[error("dictionary has more than {max} distinct words")]
    TooManyWords {
        /// Largest usable id count.
        max: u32,
    },

    /// The index rejected a word.
    #[error(transparent)]
    Index(#[from] IndexError),
}

/// Distinct words with ids, plus every occurrence in file order.
#[derive(Debug, Default)]
pub struct Dictionary {
    /// Distinct words, indexed by id.
    words: Vec<Word>,
    /// Id of each distinct word.
    ids: HashMap<Word, WordId>,
    /// Id of every word occurrence, in file order.
    occurrences: Vec<WordId>,
}

impl Dictionary {
    /// Reads and parses a dictionary file.
    pub fn load(path: &Path) -> Result<Self, DictionaryError> {
        let text = fs::read_to_string(path).map_err(|source| DictionaryError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let dictionary = Self::parse(&text)?;
        debug!(
            path = %path.display(),
            distinct = dictionary.len(),
            occurrences = dictionary.occurrences.len(),
            "Loaded dictionary"
        );
        Ok(dictionary)
    }

    /// Parses dictionary text.
    pub fn parse(text: &str) -> Result<Self, DictionaryError> {
        let mut dictionary = Self::default();
        for line in text.lines() {
            if line.trim_start().starts_with('#') {
                continue;
            }
            for token in line.split_whitespace() {
                let id = dictionary.intern(Word::new(token)?)?;
                dictionary.occurrences.push(id);
            }
        }
        Ok(dictionary)
    }

    /// Returns the id of `word`, assigning the next free one if it is new.
    fn intern(&mut self, word: Word) -> Result<WordId, DictionaryError> {
        if let Some(&id) = self.ids.get(&word) {
            return Ok(id);
        }
        // u32::MAX is reserved by the trie.
        let id = WordId::try_from(self.words.len())
            .ok()
            .filter(|&id| id != WordId::MAX)
            .ok_or(DictionaryError::TooManyWords { max: WordId::MAX })?;
        self.ids.insert(word.clone(), id);
        self.words.push(word);
        Ok(id)
    }

    /// Number of distinct words.
    pub fn len(&self) -> usize {
        self.words.len()
    }

    /// Whether the dictionary has no words.
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// The word with `id`.
    pub fn word(&self, id: WordId) -> Option<&Word> {
        self.words.get(id as usize)
    }

    /// The id of `word`, if present.
    pub fn id(&self, word: &Word) -> Option<WordId> {
        self.ids.get(word).copied()
    }

    /// Builds an index holding every occurrence.
    pub fn build_index(&self, costs: CostModel) -> Result<LevenshteinIndex, DictionaryError> {
        let mut index = LevenshteinIndex::new(costs)?;
        for &id in &self.occurrences {
            let word = &self.words[id as usize];
            index.insert_word(word, id)?;
        }
        Ok(index)
    }
}
