//! Words: immutable, whitespace-free sequences of letters.

use std::{fmt, str::FromStr};

use crate::IndexError;

/// A single Unicode code point, the alphabet of the trie.
pub type Letter = char;

/// An immutable sequence of letters with no whitespace in it.
///
/// Words compare by value, and order lexicographically by code point with a strict prefix
/// sorting before any of its extensions.
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Word {
    /// The letters, never containing whitespace.
    letters: Box<[Letter]>,
}

impl Word {
    /// Creates a word from UTF-8 text.
    ///
    /// Fails with [`IndexError::Whitespace`] if the text contains any whitespace.
    pub fn new(text: &str) -> Result<Self, IndexError> {
        if text.chars().any(char::is_whitespace) {
            return Err(IndexError::Whitespace(text.to_string()));
        }
        Ok(Self {
            letters: text.chars().collect(),
        })
    }

    /// Creates a word from a sequence of letters.
    pub fn from_letters(letters: impl IntoIterator<Item = Letter>) -> Result<Self, IndexError> {
        let letters: Box<[Letter]> = letters.into_iter().collect();
        if letters.iter().copied().any(char::is_whitespace) {
            return Err(IndexError::Whitespace(letters.iter().collect()));
        }
        Ok(Self { letters })
    }

    /// Number of letters.
    pub fn len(&self) -> usize {
        self.letters.len()
    }

    /// Whether the word has no letters.
    pub fn is_empty(&self) -> bool {
        self.letters.is_empty()
    }

    /// Returns the letter at position `i`.
    pub fn letter(&self, i: usize) -> Result<Letter, IndexError> {
        self.letters
            .get(i)
            .copied()
            .ok_or_else(|| IndexError::out_of_bounds("letter", i, self.letters.len()))
    }

    /// All letters in order.
    pub fn letters(&self) -> &[Letter] {
        &self.letters
    }

    /// Returns a new word with `other` appended.
    pub fn join(&self, other: &Self) -> Self {
        Self {
            letters: self.letters.iter().chain(other.letters.iter()).copied().collect(),
        }
    }
}

impl FromStr for Word {
    type Err = IndexError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<&str> for Word {
    type Error = IndexError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl fmt::Display for Word {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for letter in self.letters.iter() {
            write!(f, "{letter}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_whitespace() {
        assert!(matches!(Word::new("two words"), Err(IndexError::Whitespace(_))));
        assert!(matches!(Word::new("tab\there"), Err(IndexError::Whitespace(_))));
        assert!(matches!(Word::new("nl\n"), Err(IndexError::Whitespace(_))));
        assert!(Word::from_letters(['a', ' ', 'b']).is_err());
    }

    #[test]
    fn empty_word_is_allowed() {
        let w = Word::new("").unwrap();
        assert!(w.is_empty());
        assert_eq!(w.len(), 0);
        assert_eq!(w.to_string(), "");
    }

    #[test]
    fn unicode_letters() {
        let w = Word::new("päivää").unwrap();
        assert_eq!(w.len(), 6);
        assert_eq!(w.letter(1).unwrap(), 'ä');
        assert_eq!(w.to_string(), "päivää");
    }

    #[test]
    fn letter_out_of_bounds() {
        let w = Word::new("abc").unwrap();
        assert_eq!(w.letter(2).unwrap(), 'c');
        let err = w.letter(3).unwrap_err();
        assert!(matches!(
            err,
            IndexError::OutOfBounds {
                index: 3,
                len: 3,
                ..
            }
        ));
    }

    #[test]
    fn value_equality() {
        let a = Word::new("abc").unwrap();
        let b: Word = "abc".parse().unwrap();
        let c = Word::from_letters("abc".chars()).unwrap();
        assert_eq!(a, b);
        assert_eq!(b, c);
        assert_ne!(a, Word::new("abd").unwrap());
    }

    #[test]
    fn ordering_puts_prefix_first() {
        let a = Word::new("ab").unwrap();
        let b = Word::new("abc").unwrap();
        let c = Word::new("b").unwrap();
        assert!(a < b);
        assert!(b < c);
        assert_eq!(a.cmp(&Word::new("ab").unwrap()), std::cmp::Ordering::Equal);
    }

    #[test]
    fn join_concatenates() {
        let a = Word::new("foo").unwrap();
        let b = Word::new("bar").unwrap();
        assert_eq!(a.join(&b).to_string(), "foobar");
        assert_eq!(a.join(&Word::default()), a);
    }
}
