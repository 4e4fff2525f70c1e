//! Golden test infrastructure for rendered doxs docstrings
//!
//! Each corpus case holds a raw record (inline or in a YAML/JSON file next
//! to the case) and the expected outcome. Successful cases are compared with
//! a plain-text snapshot of the rendered docstring; failing cases with the
//! violations they must report.

pub mod corpus;
pub mod diff;
pub mod runner;
pub mod snapshot;

use doxs_core::DialectConfig;
use std::path::PathBuf;
use thiserror::Error;

pub use corpus::{CorpusManager, TestCase};
pub use diff::{DiffEngine, DiffOptions, DiffResult};
pub use runner::{GoldenTestRunner, TestResult};
pub use snapshot::SnapshotManager;

/// Snapshots live in this directory under the corpus root
pub const SNAPSHOT_SUBDIR: &str = "snapshots";

/// Golden test error types
#[derive(Debug, Error)]
pub enum GoldenError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Record load error: {0}")]
    Loader(#[from] doxs_schemas::LoaderError),

    #[error("Snapshot mismatch: {0}")]
    SnapshotMismatch(String),

    #[error("Corpus error: {0}")]
    CorpusError(String),

    #[error("Test failed: {0}")]
    TestFailed(String),
}

pub type Result<T> = std::result::Result<T, GoldenError>;

/// Where the corpus lives and how rendered output is checked against it
#[derive(Debug, Clone)]
pub struct GoldenConfig {
    /// Root of the case tree (`<category>/<name>/case.json`)
    pub corpus_dir: PathBuf,

    /// Root of the `.txt` snapshots, normally `<corpus_dir>/snapshots`
    pub snapshot_dir: PathBuf,

    /// Dialect for cases that carry no `dialect` override
    pub dialect: DialectConfig,

    /// Overwrite snapshots that differ and create missing ones
    pub update_snapshots: bool,

    pub diff_options: DiffOptions,

    pub verbose: bool,
}

fn env_flag(value: Option<String>) -> bool {
    value.is_some_and(|v| v == "1" || v.eq_ignore_ascii_case("true"))
}

impl Default for GoldenConfig {
    /// The workspace corpus with the NumPy dialect
    fn default() -> Self {
        let corpus_dir = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../golden-corpus");

        Self {
            snapshot_dir: corpus_dir.join(SNAPSHOT_SUBDIR),
            corpus_dir,
            dialect: DialectConfig::numpy(),
            update_snapshots: false,
            diff_options: DiffOptions::default(),
            verbose: false,
        }
    }
}

impl GoldenConfig {
    /// Defaults adjusted by `GOLDEN_CORPUS_DIR`, `UPDATE_GOLDEN` and
    /// `GOLDEN_VERBOSE`
    pub fn from_env() -> Self {
        Self::default().with_overrides_from(|name| std::env::var(name).ok())
    }

    /// Apply the overrides `from_env` reads, taking values from `lookup`
    pub fn with_overrides_from<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(dir) = lookup("GOLDEN_CORPUS_DIR") {
            self = self.with_corpus_dir(dir);
        }
        self.update_snapshots = env_flag(lookup("UPDATE_GOLDEN"));
        self.verbose = env_flag(lookup("GOLDEN_VERBOSE"));
        self
    }

    /// Use a corpus rooted at `dir`, with snapshots in `dir/snapshots`
    pub fn with_corpus_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        let dir = dir.into();
        self.snapshot_dir = dir.join(SNAPSHOT_SUBDIR);
        self.corpus_dir = dir;
        self
    }

    pub fn with_dialect(mut self, dialect: DialectConfig) -> Self {
        self.dialect = dialect;
        self
    }
}

/// Define a `#[test]` that runs one corpus case by `category/name`
#[macro_export]
macro_rules! golden_test {
    ($name:ident, $test_path:expr) => {
        #[test]
        fn $name() {
            use $crate::{GoldenConfig, GoldenTestRunner};

            let runner = GoldenTestRunner::new(GoldenConfig::from_env());
            if let Err(e) = runner.run_test($test_path) {
                panic!("Golden test {} failed: {}", $test_path, e);
            }
        }
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_points_at_workspace_corpus() {
        let config = GoldenConfig::default();
        assert!(config.corpus_dir.ends_with("golden-corpus"));
        assert_eq!(config.snapshot_dir, config.corpus_dir.join("snapshots"));
        assert_eq!(config.dialect, DialectConfig::numpy());
        assert!(!config.update_snapshots);
    }

    #[test]
    fn test_overrides() {
        let config = GoldenConfig::default().with_overrides_from(|name| match name {
            "GOLDEN_CORPUS_DIR" => Some("/tmp/corpus".to_string()),
            "UPDATE_GOLDEN" => Some("TRUE".to_string()),
            _ => None,
        });
        assert_eq!(config.corpus_dir, PathBuf::from("/tmp/corpus"));
        assert_eq!(config.snapshot_dir, PathBuf::from("/tmp/corpus/snapshots"));
        assert!(config.update_snapshots);
        assert!(!config.verbose);
    }

    #[test]
    fn test_update_flag_values() {
        assert!(env_flag(Some("1".to_string())));
        assert!(!env_flag(Some("0".to_string())));
        assert!(!env_flag(None));
    }
}
