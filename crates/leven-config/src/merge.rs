//! Configuration merging.
//!
//! Merges multiple `RawConfig` files into a single resolved `Config`.

use std::path::{Path, PathBuf};

use crate::{
    Config, CostSettings, SearchSettings,
    parse::{RawConfig, RawCosts, RawSearchSettings},
};

/// A parsed config file with its source path.
pub struct ParsedConfig {
    /// Path to the config file.
    pub path: PathBuf,
    /// Parsed raw configuration.
    pub config: RawConfig,
}

/// Merges configuration files given highest precedence first.
///
/// Merge rules:
/// - Scalar settings: the highest precedence defined value wins
/// - Presets: union of all files
/// - Pairs and groups: concatenated lowest precedence first, so a later pair for the same
///   letters overrides an earlier one when the cost model is built
pub fn merge_configs(configs: &[ParsedConfig]) -> Config {
    let mut costs = CostSettings::default();
    let mut search = SearchSettings::default();

    // Lowest precedence first so higher precedence overwrites
    for parsed in configs.iter().rev() {
        if let Some(ref raw) = parsed.config.costs {
            apply_raw_costs(&mut costs, raw);
        }
        if let Some(ref raw) = parsed.config.search {
            apply_raw_search(&mut search, raw);
        }
    }

    Config {
        costs,
        search,
        config_root: configs
            .first()
            .and_then(|c| c.path.parent())
            .map(Path::to_path_buf),
    }
}

/// Applies one file's `[costs]` on top of `result`.
fn apply_raw_costs(result: &mut CostSettings, raw: &RawCosts) {
    if let Some(v) = raw.insertion {
        result.insertion = v;
    }
    if let Some(v) = raw.deletion {
        result.deletion = v;
    }
    if let Some(v) = raw.substitution {
        result.substitution = v;
    }
    if let Some(v) = raw.transposition {
        result.transposition = v;
    }
    if let Some(v) = raw.transpositions {
        result.transpositions = v;
    }
    if let Some(v) = raw.end_deletion {
        result.end_deletion = v;
    }
    if let Some(v) = raw.start_insertion {
        result.start_insertion = v;
    }
    if let Some(v) = raw.substring_start_limit {
        result.substring_start_limit = v;
    }
    if let Some(v) = raw.substring {
        result.substring = v;
    }
    for preset in raw.presets.iter().flatten() {
        if !result.presets.contains(preset) {
            result.presets.push(*preset);
        }
    }
    result
        .pairs
        .extend(raw.pairs.iter().flatten().cloned());
    result
        .groups
        .extend(raw.groups.iter().flatten().cloned());
}

/// Applies one file's `[search]` on top of `result`.
fn apply_raw_search(result: &mut SearchSettings, raw: &RawSearchSettings) {
    if let Some(v) = raw.max_error {
        result.max_error = v;
    }
    if let Some(v) = raw.limit {
        result.limit = v;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{PairOverride, Preset, parse::parse_config};

    fn parsed(path: &str, toml: &str) -> ParsedConfig {
        ParsedConfig {
            path: PathBuf::from(path),
            config: parse_config(toml).unwrap(),
        }
    }

    #[test]
    fn empty_list_gives_defaults() {
        let config = merge_configs(&[]);
        assert_eq!(config.costs, CostSettings::default());
        assert!(config.config_root.is_none());
    }

    #[test]
    fn closest_scalar_wins() {
        let config = merge_configs(&[
            parsed("/a/b/.leven.toml", "[costs]\ninsertion = 10\n"),
            parsed("/a/.leven.toml", "[costs]\ninsertion = 20\ndeletion = 30\n"),
        ]);
        assert_eq!(config.costs.insertion, 10);
        assert_eq!(config.costs.deletion, 30);
        assert_eq!(config.costs.substitution, 100);
        assert_eq!(config.config_root, Some(PathBuf::from("/a/b")));
    }

    #[test]
    fn presets_are_unioned() {
        let config = merge_configs(&[
            parsed("/a/b/.leven.toml", "[costs]\npresets = [\"keyboard\", \"latin-accents\"]\n"),
            parsed("/a/.leven.toml", "[costs]\npresets = \"keyboard\"\n"),
            parsed("/.leven.toml", "[costs]\npresets = \"numberpad\"\n"),
        ]);
        assert_eq!(
            config.costs.presets,
            vec![Preset::Numberpad, Preset::Keyboard, Preset::LatinAccents]
        );
    }

    #[test]
    fn pairs_concatenate_lowest_first() {
        let config = merge_configs(&[
            parsed(
                "/a/b/.leven.toml",
                "[[costs.pairs]]\nletters = \"bd\"\ncost = 1\n",
            ),
            parsed(
                "/a/.leven.toml",
                "[[costs.pairs]]\nletters = \"bd\"\ncost = 50\n",
            ),
        ]);
        assert_eq!(
            config.costs.pairs,
            vec![
                PairOverride {
                    letters: "bd".into(),
                    cost: 50
                },
                PairOverride {
                    letters: "bd".into(),
                    cost: 1
                },
            ]
        );
    }

    #[test]
    fn search_settings_merge() {
        let config = merge_configs(&[
            parsed("/a/b/.leven.toml", "[search]\nlimit = 3\n"),
            parsed("/a/.leven.toml", "[search]\nmax_error = 250\nlimit = 7\n"),
        ]);
        assert_eq!(config.search.limit, 3);
        assert_eq!(config.search.max_error, 250);
    }
}
