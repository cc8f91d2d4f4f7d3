use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Where records live and how many stay ranked
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Directory holding new and ranked records
    pub ranked_dir: PathBuf,
    /// Directory receiving records that fall out of the ranking
    pub history_dir: PathBuf,
    /// Number of records kept in `ranked_dir`
    pub top_n: usize,
}

impl Default for StorageConfig {
    fn default() -> Self {
        StorageConfig {
            ranked_dir: PathBuf::from("Top10"),
            history_dir: PathBuf::from("History"),
            top_n: 10,
        }
    }
}

impl StorageConfig {
    /// Default directory names placed under `root`
    pub fn under(root: &Path) -> Self {
        let defaults = Self::default();
        StorageConfig {
            ranked_dir: root.join(defaults.ranked_dir),
            history_dir: root.join(defaults.history_dir),
            ..defaults
        }
    }
}
