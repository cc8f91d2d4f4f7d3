use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;
use shogiban_record::StorageConfig;

/// Contents of `shogiban.toml`
///
/// ```toml
/// [storage]
/// ranked_dir = "Top10"
/// history_dir = "History"
/// top_n = 10
/// ```
#[derive(Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Config {
    pub storage: StorageConfig,
}

impl Config {
    /// Read `path`; a missing file means defaults
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            log::debug!("no config at {}, using defaults", path.display());
            return Ok(Self::default());
        }
        let text = fs::read_to_string(path)
            .with_context(|| format!("failed to read config {}", path.display()))?;
        Self::parse(&text).with_context(|| format!("invalid config {}", path.display()))
    }

    pub fn parse(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;

    #[test]
    fn test_partial_config_keeps_defaults() {
        let config = Config::parse("[storage]\ntop_n = 3\n").unwrap();
        assert_eq!(config.storage.top_n, 3);
        assert_eq!(config.storage.ranked_dir, PathBuf::from("Top10"));
        assert_eq!(config.storage.history_dir, PathBuf::from("History"));
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let tmp = tempfile::tempdir().unwrap();
        let config = Config::load(&tmp.path().join("shogiban.toml")).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_bad_config_is_an_error() {
        assert!(Config::parse("[storage]\ntop_n = \"ten\"\n").is_err());
    }
}
