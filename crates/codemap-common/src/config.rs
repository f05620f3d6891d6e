use crate::ignore_matcher::IgnoreMatcher;
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Output verbosity for the symbol extractor. Strictly additive: `Names` is
/// a subset of `Signatures`, which is a subset of `Full`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DetailLevel {
    Names,
    Signatures,
    Full,
}

/// The `(root, options)` bundle threaded through the walker and the rest of
/// the pipeline.
pub struct ScanConfig {
    pub root: PathBuf,
    pub detail: DetailLevel,
    pub ignore: IgnoreMatcher,
    pub language_filter: bool,
    pub workers: usize,
}

/// On-disk shape of `codemap.toml`'s `[scan]` table. Any field a project
/// doesn't set falls back to [`ScanConfig`]'s defaults.
#[derive(Debug, Default, Deserialize)]
pub struct ScanConfigFile {
    #[serde(default)]
    pub scan: ScanConfigTable,
}

#[derive(Debug, Default, Deserialize)]
pub struct ScanConfigTable {
    pub detail: Option<DetailLevel>,
    pub language_filter: Option<bool>,
    pub workers: Option<usize>,
}

impl ScanConfig {
    /// Builds a config for `root` using defaults (signatures detail, the
    /// language filter on, one worker per available core) overridden by
    /// `codemap.toml` if present, with an explicit `.gitignore` matcher.
    pub fn load(root: &Path) -> Self {
        let file = std::fs::read_to_string(root.join("codemap.toml"))
            .ok()
            .and_then(|text| toml::from_str::<ScanConfigFile>(&text).ok())
            .unwrap_or_default();

        Self {
            root: root.to_path_buf(),
            detail: file.scan.detail.unwrap_or(DetailLevel::Signatures),
            ignore: IgnoreMatcher::from_root(root),
            language_filter: file.scan.language_filter.unwrap_or(true),
            workers: file
                .scan
                .workers
                .unwrap_or_else(|| std::thread::available_parallelism().map(|n| n.get()).unwrap_or(1)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_without_config_file() {
        let tmp = tempfile::tempdir().unwrap();
        let config = ScanConfig::load(tmp.path());
        assert_eq!(config.detail, DetailLevel::Signatures);
        assert!(config.language_filter);
        assert!(config.workers >= 1);
    }

    #[test]
    fn reads_codemap_toml() {
        let tmp = tempfile::tempdir().unwrap();
        std::fs::write(
            tmp.path().join("codemap.toml"),
            "[scan]\ndetail = \"full\"\nworkers = 4\n",
        )
        .unwrap();
        let config = ScanConfig::load(tmp.path());
        assert_eq!(config.detail, DetailLevel::Full);
        assert_eq!(config.workers, 4);
    }
}
