//! Configuration file parsing.
//!
//! Parses individual `.leven.toml` files into `RawConfig` values that keep every field
//! optional until merging.

use std::{fmt, fs, path::Path};

use leven_index::Cost;
use serde::{Deserialize, Serialize};
use serde_with::{OneOrMany, serde_as};
#[cfg(test)]
use toml::de::Error as TomlError;

use crate::ConfigError;

/// Raw configuration as parsed directly from a TOML file.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawConfig {
    /// When true, stop discovery here and ignore parent and global configs.
    pub root: Option<bool>,
    /// Cost settings section.
    pub costs: Option<RawCosts>,
    /// Search settings section.
    pub search: Option<RawSearchSettings>,
}

/// Raw `[costs]` section.
#[serde_as]
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawCosts {
    /// Cost of inserting a query letter.
    pub insertion: Option<Cost>,
    /// Cost of deleting a stored letter.
    pub deletion: Option<Cost>,
    /// Base substitution cost.
    pub substitution: Option<Cost>,
    /// Cost of swapping adjacent letters.
    pub transposition: Option<Cost>,
    /// Whether swaps count as one edit.
    pub transpositions: Option<bool>,
    /// Deletion cost in the last query column.
    pub end_deletion: Option<Cost>,
    /// Root row insertion cost.
    pub start_insertion: Option<Cost>,
    /// Query length from which `start_insertion` applies.
    pub substring_start_limit: Option<usize>,
    /// Apply the substring preset.
    pub substring: Option<bool>,
    /// Named presets. Accepts a single string or an array.
    #[serde_as(as = "Option<OneOrMany<_>>")]
    pub presets: Option<Vec<Preset>>,
    /// `[[costs.pairs]]` entries.
    pub pairs: Option<Vec<PairOverride>>,
    /// `[[costs.groups]]` entries.
    pub groups: Option<Vec<GroupDefinition>>,
}

/// Raw `[search]` section.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawSearchSettings {
    /// Error budget for queries.
    pub max_error: Option<Cost>,
    /// Maximum matches shown per query word.
    pub limit: Option<usize>,
}

/// A canned set of overrides or groups.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Preset {
    /// Adjacent keys on a Nordic keyboard.
    Keyboard,
    /// Phone keypad digits and their letters.
    Numberpad,
    /// Accented Latin letter groups.
    LatinAccents,
    /// Accented Greek letter groups.
    GreekAccents,
}

impl fmt::Display for Preset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Keyboard => "keyboard",
            Self::Numberpad => "numberpad",
            Self::LatinAccents => "latin-accents",
            Self::GreekAccents => "greek-accents",
        };
        f.write_str(name)
    }
}

/// A substitution cost for one unordered pair of letters.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct PairOverride {
    /// Exactly two letters, e.g. `"bd"`.
    pub letters: String,
    /// Substitution cost between them.
    pub cost: Cost,
}

/// Letters that substitute for each other at a shared cost.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct GroupDefinition {
    /// Member letters, e.g. `"eéèêë"`.
    pub letters: String,
    /// Substitution cost between any two members.
    pub cost: Cost,
}

/// Parses a configuration file from disk.
pub fn parse_config_file(path: &Path) -> Result<RawConfig, ConfigError> {
    let contents = fs::read_to_string(path).map_err(|source| ConfigError::ReadFile {
        path: path.to_path_buf(),
        source,
    })?;

    parse_config_str(&contents, path)
}

/// Parses configuration from a TOML string. `path` is only used for error reporting.
pub fn parse_config_str(contents: &str, path: &Path) -> Result<RawConfig, ConfigError> {
    toml::from_str(contents).map_err(|source| ConfigError::ParseToml {
        path: path.to_path_buf(),
        source,
    })
}

/// Parses configuration from a TOML string without path context.
#[cfg(test)]
pub fn parse_config(contents: &str) -> Result<RawConfig, TomlError> {
    toml::from_str(contents)
}

/// Checks if a config file has `root = true` set.
///
/// Returns false if the file cannot be read or parsed.
pub fn is_root_config(path: &Path) -> bool {
    let Ok(contents) = fs::read_to_string(path) else {
        return false;
    };
    let Ok(config) = toml::from_str::<RawConfig>(&contents) else {
        return false;
    };
    config.root == Some(true)
}
