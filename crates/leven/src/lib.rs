//! leven: approximate word lookup.
//!
//! Builds a weighted Levenshtein index over a word list and reports every word within an
//! error budget of a query. Edit costs come from layered `.leven.toml` files.

#![warn(missing_docs)]

pub mod cli;
