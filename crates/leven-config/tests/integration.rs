//! Integration tests for leven-config.
//!
//! Tests the full configuration pipeline: discovery -> parse -> merge -> cost model.

// Integration tests live outside cfg(test) by design
#![allow(clippy::tests_outside_test_module)]

use std::{
    fs,
    path::{Path, PathBuf},
};

use leven_config::{CONFIG_FILENAME, Config, ConfigError, ConfigWarning, Preset};
use leven_index::{LevenshteinIndex, Word};

/// Test helper to create a temporary directory structure for tests.
struct TestEnv {
    root: tempfile::TempDir,
}

impl TestEnv {
    fn new() -> Self {
        Self {
            root: tempfile::tempdir().unwrap(),
        }
    }

    fn path(&self) -> &Path {
        self.root.path()
    }

    /// Creates a directory and returns its path.
    fn create_dir(&self, rel_path: &str) -> PathBuf {
        let path = self.root.path().join(rel_path);
        fs::create_dir_all(&path).unwrap();
        path
    }

    /// Writes a `.leven.toml` into `rel_dir` and returns its path.
    fn create_config(&self, rel_dir: &str, content: &str) -> PathBuf {
        let path = self.create_dir(rel_dir).join(CONFIG_FILENAME);
        fs::write(&path, content).unwrap();
        path
    }
}

#[test]
fn test_load_without_config_uses_defaults() {
    let env = TestEnv::new();
    let dir = env.create_dir("project");
    let config = Config::load_from_files(&[]).unwrap();
    assert_eq!(config.search.max_error, 100);
    assert!(config.costs.presets.is_empty());
    assert!(Config::load(&dir).is_ok());
}

#[test]
fn test_nested_configs_merge() {
    let env = TestEnv::new();
    env.create_config(
        "",
        r#"
root = true

[costs]
insertion = 80
presets = "keyboard"

[[costs.pairs]]
letters = "bd"
cost = 60

[search]
max_error = 150
"#,
    );
    env.create_config(
        "project",
        r#"
[costs]
insertion = 40

[[costs.pairs]]
letters = "bd"
cost = 10
"#,
    );
    let cwd = env.create_dir("project/src");

    let config = Config::load(&cwd).unwrap();
    assert_eq!(config.config_root, Some(env.path().join("project")));
    assert_eq!(config.costs.insertion, 40);
    assert_eq!(config.costs.presets, vec![Preset::Keyboard]);
    assert_eq!(config.search.max_error, 150);

    let model = config.cost_model().unwrap();
    assert_eq!(model.insertion_cost(), 40);
    assert_eq!(model.substitution_cost('b', 'd'), 10);
    assert_eq!(model.substitution_cost('q', 'w'), 30);
}

#[test]
fn test_root_config_hides_parents() {
    let env = TestEnv::new();
    env.create_config("", "[costs]\ndeletion = 7\n");
    env.create_config("inner", "root = true\n");
    let config = Config::load(&env.path().join("inner")).unwrap();
    assert_eq!(config.costs.deletion, 100);
}

#[test]
fn test_parse_error_names_file() {
    let env = TestEnv::new();
    let path = env.create_config("", "root = true\n[costs\n");
    match Config::load(env.path()) {
        Err(ConfigError::ParseToml { path: bad, .. }) => assert_eq!(bad, path),
        other => panic!("expected parse error, got {other:?}"),
    }
}

#[test]
fn test_invalid_pair_fails_cost_model() {
    let env = TestEnv::new();
    env.create_config(
        "",
        "root = true\n[[costs.pairs]]\nletters = \"abc\"\ncost = 1\n",
    );
    let config = Config::load(env.path()).unwrap();
    assert!(matches!(
        config.cost_model(),
        Err(ConfigError::InvalidLetter { .. })
    ));
}

#[test]
fn test_conflicting_groups_warn_and_fail() {
    let env = TestEnv::new();
    env.create_config(
        "",
        r#"
root = true

[[costs.groups]]
letters = "oö"
cost = 20

[[costs.groups]]
letters = "öø"
cost = 20
"#,
    );
    let config = Config::load(env.path()).unwrap();
    assert_eq!(
        config.validate(),
        vec![ConfigWarning::GroupLetterConflict { letter: 'ö' }]
    );
    assert!(matches!(
        config.cost_model(),
        Err(ConfigError::InvalidCosts(_))
    ));
}

#[test]
fn test_configured_model_drives_search() {
    let env = TestEnv::new();
    env.create_config(
        "",
        r#"
root = true

[costs]
substring = true
presets = ["latin-accents"]
"#,
    );
    let config = Config::load(env.path()).unwrap();
    let mut index = LevenshteinIndex::new(config.cost_model().unwrap()).unwrap();
    index.insert_word(&Word::new("café").unwrap(), 1).unwrap();
    index.insert_word(&Word::new("cafeteria").unwrap(), 2).unwrap();

    let matches = index
        .find_words(&Word::new("cafe").unwrap(), config.search.max_error)
        .unwrap();
    let found: Vec<(u32, u32)> = matches.iter().map(|m| (m.id, m.error)).collect();
    assert_eq!(found, vec![(1, 30), (2, 75)]);
}

#[test]
fn test_settings_to_toml_reflects_merge() {
    let env = TestEnv::new();
    env.create_config("", "root = true\n[search]\nlimit = 4\n");
    let config = Config::load(env.path()).unwrap();
    let toml = config.settings_to_toml().unwrap();
    assert!(toml.contains("limit = 4"));
    assert!(toml.contains("substitution = 100"));
}
