//! Shared context for running CLI commands.

use std::{
    env,
    path::{Path, PathBuf},
    process::ExitCode,
};

use leven_config::Config;
use leven_index::{CostModel, LevenshteinIndex};
use tracing::info;

use crate::cli::dictionary::Dictionary;

/// Command execution context built once per CLI invocation.
pub struct CommandContext {
    /// Current working directory.
    pub cwd: PathBuf,
    /// Loaded configuration (may be default if no config files found).
    pub config: Config,
}

impl CommandContext {
    /// Loads the current directory and configuration.
    pub fn load() -> Result<Self, ExitCode> {
        let cwd = current_dir_or_failure()?;
        let config = load_config_or_failure(&cwd)?;
        Ok(Self { cwd, config })
    }

    /// Loads only the current directory, skipping configuration parsing.
    ///
    /// Used for `init` and `check`, which should work even when an existing config file is
    /// invalid.
    pub fn load_cwd_only() -> Result<Self, ExitCode> {
        let cwd = current_dir_or_failure()?;
        Ok(Self {
            cwd,
            config: Config::default(),
        })
    }

    /// Builds the cost model from the loaded configuration.
    pub fn cost_model(&self) -> Result<CostModel, ExitCode> {
        self.config.cost_model().map_err(|e| {
            eprintln!("error: invalid cost settings: {e}");
            ExitCode::FAILURE
        })
    }

    /// Reads a dictionary relative to the working directory.
    pub fn dictionary(&self, path: &Path) -> Result<Dictionary, ExitCode> {
        Dictionary::load(&self.cwd.join(path)).map_err(|e| {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        })
    }

    /// Reads a dictionary and indexes it with the configured costs.
    pub fn index(&self, path: &Path) -> Result<(Dictionary, LevenshteinIndex), ExitCode> {
        let dictionary = self.dictionary(path)?;
        let costs = self.cost_model()?;
        let index = dictionary.build_index(costs).map_err(|e| {
            eprintln!("error: failed to build index: {e}");
            ExitCode::FAILURE
        })?;
        info!(
            words = index.num_words(),
            nodes = index.num_nodes(),
            "Built index"
        );
        Ok((dictionary, index))
    }
}

/// Returns the current working directory or exits with a consistent error.
fn current_dir_or_failure() -> Result<PathBuf, ExitCode> {
    env::current_dir().map_err(|e| {
        eprintln!("error: could not determine current directory: {e}");
        ExitCode::FAILURE
    })
}

/// Loads configuration from the provided directory or exits with an error.
fn load_config_or_failure(cwd: &Path) -> Result<Config, ExitCode> {
    Config::load(cwd).map_err(|e| {
        eprintln!("error: failed to load configuration: {e}");
        ExitCode::FAILURE
    })
}
