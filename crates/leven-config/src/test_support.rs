//! A scratch directory tree for discovery and parsing tests.

use std::{
    fs,
    path::{Path, PathBuf},
};

use tempfile::TempDir;

use crate::discovery::CONFIG_FILENAME;

/// Directories and `.leven.toml` files under a temporary root, removed on drop.
pub struct ConfigTree(TempDir);

impl ConfigTree {
    /// Creates an empty tree.
    pub fn new() -> Self {
        Self(tempfile::tempdir().unwrap())
    }

    /// Root of the tree.
    pub fn path(&self) -> &Path {
        self.0.path()
    }

    /// Creates `rel` and its parents; `""` is the root itself.
    pub fn dir(&self, rel: &str) -> PathBuf {
        let dir = self.0.path().join(rel);
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    /// Writes `content` to `rel/.leven.toml` and returns the file's path.
    pub fn config(&self, rel: &str, content: &str) -> PathBuf {
        let file = self.dir(rel).join(CONFIG_FILENAME);
        fs::write(&file, content).unwrap();
        file
    }
}
