//! Error types for leven configuration.

use std::{io, path::PathBuf};

use leven_index::IndexError;
use thiserror::Error;
use toml::{de, ser};

/// Errors that can occur when loading or applying configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read a configuration file.
    #[error("failed to read config file {path}: {source}")]
    ReadFile {
        /// Path to the file that could not be read.
        path: PathBuf,
        /// Underlying I/O error.
        source: io::Error,
    },

    /// Failed to parse TOML configuration.
    #[error("failed to parse config file {path}: {source}")]
    ParseToml {
        /// Path to the file that could not be parsed.
        path: PathBuf,
        /// Underlying TOML parse error.
        source: de::Error,
    },

    /// A pair or group entry has unusable letters.
    #[error("invalid letters '{letters}': {reason}")]
    InvalidLetter {
        /// The letters as written in the config.
        letters: String,
        /// What is wrong with them.
        reason: &'static str,
    },

    /// The cost model rejected the configured groups.
    #[error("invalid cost settings: {0}")]
    InvalidCosts(#[from] IndexError),

    /// Failed to serialize the effective settings.
    #[error("failed to serialize settings: {0}")]
    Serialize(#[from] ser::Error),

    /// Failed to determine home directory.
    #[error("could not determine home directory")]
    NoHomeDirectory,
}
