//! Configuration system for leven.
//!
//! leven uses TOML configuration files named `.leven.toml`. Configuration is resolved by
//! walking up the directory tree from the current working directory, collecting any
//! `.leven.toml` files found, then loading `~/.leven.toml` as the global config with lowest
//! precedence. The merged [`Config`] builds the [`CostModel`] used for searching.

#![warn(missing_docs)]

mod discovery;
mod error;
mod merge;
mod model;
mod parse;
mod templates;
#[cfg(test)]
mod test_support;
mod validate;

use std::path::{Path, PathBuf};

pub use discovery::{CONFIG_FILENAME, discover_config_files, global_config_path, is_global_config};
pub use error::ConfigError;
use leven_index::{Cost, CostConfig, CostModel, DEFAULT_ERROR};
pub use merge::{ParsedConfig, merge_configs};
pub use parse::{
    GroupDefinition, PairOverride, Preset, RawConfig, RawCosts, RawSearchSettings,
    parse_config_file, parse_config_str,
};
use serde::Serialize;
pub use templates::{global_template, local_template};
pub use validate::ConfigWarning;
use validate::validate_config;

/// Default number of matches shown per query word.
pub const DEFAULT_LIMIT: usize = 10;

/// Merged configuration from every discovered `.leven.toml`.
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// Cost settings.
    pub costs: CostSettings,
    /// Search settings.
    pub search: SearchSettings,
    /// Directory containing the most specific config file.
    pub config_root: Option<PathBuf>,
}

impl Config {
    /// Loads configuration by discovering and merging all relevant `.leven.toml` files.
    ///
    /// Returns `Ok(Config::default())` if no configuration files are found.
    pub fn load(cwd: &Path) -> Result<Self, ConfigError> {
        let config_files = discover_config_files(cwd);
        Self::load_from_files(&config_files)
    }

    /// Loads configuration from config file paths given highest precedence first.
    pub fn load_from_files(files: &[PathBuf]) -> Result<Self, ConfigError> {
        let parsed = files
            .iter()
            .map(|path| {
                Ok(ParsedConfig {
                    path: path.clone(),
                    config: parse_config_file(path)?,
                })
            })
            .collect::<Result<Vec<_>, ConfigError>>()?;

        Ok(merge_configs(&parsed))
    }

    /// Builds the cost model described by the `[costs]` settings.
    ///
    /// Base costs apply first, then the substring preset, named presets, groups and finally
    /// pair overrides, so an explicit pair wins over any preset.
    pub fn cost_model(&self) -> Result<CostModel, ConfigError> {
        model::build_cost_model(&self.costs)
    }

    /// Validates the configuration and returns any warnings.
    pub fn validate(&self) -> Vec<ConfigWarning> {
        validate_config(self)
    }

    /// Serializes the effective settings to TOML, in the layout of a `.leven.toml` file.
    pub fn settings_to_toml(&self) -> Result<String, ConfigError> {
        let serializable = SerializableSettings {
            costs: &self.costs,
            search: &self.search,
        };
        Ok(toml::to_string_pretty(&serializable)?)
    }
}

/// Resolved `[costs]` settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CostSettings {
    /// Cost of inserting a query letter.
    pub insertion: Cost,
    /// Cost of deleting a stored letter.
    pub deletion: Cost,
    /// Base substitution cost.
    pub substitution: Cost,
    /// Cost of swapping adjacent letters.
    pub transposition: Cost,
    /// Whether swaps count as one edit.
    pub transpositions: bool,
    /// Deletion cost in the last query column.
    pub end_deletion: Cost,
    /// Root row insertion cost.
    pub start_insertion: Cost,
    /// Query length from which `start_insertion` applies.
    pub substring_start_limit: usize,
    /// Whether the substring preset is applied.
    pub substring: bool,
    /// Named presets, each listed once.
    pub presets: Vec<Preset>,
    /// Pair overrides, lowest precedence first.
    pub pairs: Vec<PairOverride>,
    /// Groups, lowest precedence first.
    pub groups: Vec<GroupDefinition>,
}

impl Default for CostSettings {
    fn default() -> Self {
        let base = CostConfig::default();
        Self {
            insertion: base.insertion,
            deletion: base.deletion,
            substitution: base.substitution,
            transposition: base.transposition,
            transpositions: base.transpositions,
            end_deletion: base.end_deletion,
            start_insertion: base.start_insertion,
            substring_start_limit: base.substring_start_limit,
            substring: false,
            presets: Vec::new(),
            pairs: Vec::new(),
            groups: Vec::new(),
        }
    }
}

impl CostSettings {
    /// The base costs, before any preset, group or pair.
    pub fn base(&self) -> CostConfig {
        CostConfig {
            insertion: self.insertion,
            deletion: self.deletion,
            substitution: self.substitution,
            transposition: self.transposition,
            end_deletion: self.end_deletion,
            start_insertion: self.start_insertion,
            substring_start_limit: self.substring_start_limit,
            transpositions: self.transpositions,
        }
    }
}

/// Resolved `[search]` settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchSettings {
    /// Error budget for queries.
    pub max_error: Cost,
    /// Maximum matches shown per query word.
    pub limit: usize,
}

impl Default for SearchSettings {
    fn default() -> Self {
        Self {
            max_error: DEFAULT_ERROR,
            limit: DEFAULT_LIMIT,
        }
    }
}

/// Borrowed view of the settings for TOML output.
#[derive(Serialize)]
struct SerializableSettings<'a> {
    /// Cost settings.
    costs: &'a CostSettings,
    /// Search settings.
    search: &'a SearchSettings,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_cost_config() {
        let config = Config::default();
        assert_eq!(config.costs.base(), CostConfig::default());
        assert!(!config.costs.substring);
        assert_eq!(config.search.max_error, 100);
        assert_eq!(config.search.limit, 10);
        assert!(config.config_root.is_none());
    }

    #[test]
    fn load_from_no_files() {
        let config = Config::load_from_files(&[]).unwrap();
        assert_eq!(config.costs, CostSettings::default());
    }

    #[test]
    fn settings_to_toml_round_trips() {
        let mut config = Config::default();
        config.costs.presets.push(Preset::Keyboard);
        config.costs.pairs.push(PairOverride {
            letters: "bd".into(),
            cost: 1,
        });
        let toml = config.settings_to_toml().unwrap();
        assert!(toml.contains("[costs]"));
        assert!(toml.contains("[search]"));
        assert!(toml.contains("insertion = 100"));
        assert!(toml.contains("max_error = 100"));

        let parsed = parse_config_str(&toml, Path::new("effective.toml")).unwrap();
        let costs = parsed.costs.unwrap();
        assert_eq!(costs.presets, Some(vec![Preset::Keyboard]));
        assert_eq!(costs.pairs.unwrap()[0].letters, "bd");
        assert_eq!(parsed.search.unwrap().limit, Some(10));
    }
}
