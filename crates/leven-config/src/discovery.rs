//! Configuration file discovery.
//!
//! Collects `.leven.toml` files from the working directory upwards, then the global
//! `~/.leven.toml`, unless a file on the way declares itself the root.

use std::path::{Path, PathBuf};

use directories::BaseDirs;

use crate::parse::is_root_config;

/// The configuration filename.
pub const CONFIG_FILENAME: &str = ".leven.toml";

/// Discovers all configuration files relevant to the given directory.
///
/// Returns paths in precedence order: closest to `cwd` first, global (`~/.leven.toml`) last.
/// The walk stops at the first file with `root = true`, and the global file is then skipped.
/// Returns an empty vector if no configuration files are found.
pub fn discover_config_files(cwd: &Path) -> Vec<PathBuf> {
    let mut configs = Vec::new();

    for dir in cwd.ancestors() {
        let config_path = dir.join(CONFIG_FILENAME);
        if !config_path.is_file() {
            continue;
        }
        let is_root = is_root_config(&config_path);
        configs.push(config_path);
        if is_root {
            return configs;
        }
    }

    if let Some(global_path) = global_config_path()
        && global_path.is_file()
        && !configs.contains(&global_path)
    {
        configs.push(global_path);
    }

    configs
}

/// Returns the path to the global configuration file (`~/.leven.toml`).
///
/// Returns `None` if the home directory cannot be determined.
pub fn global_config_path() -> Option<PathBuf> {
    BaseDirs::new().map(|dirs| dirs.home_dir().join(CONFIG_FILENAME))
}

/// Checks if a path is the global configuration file.
pub fn is_global_config(path: &Path) -> bool {
    global_config_path().is_some_and(|global| path == global)
}
