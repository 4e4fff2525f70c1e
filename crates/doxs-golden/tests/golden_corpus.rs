//! Golden tests for rendered docstrings
//!
//! Every case under `golden-corpus/` is compiled and compared with its
//! snapshot. Run with `UPDATE_GOLDEN=1` to refresh snapshots after an
//! intentional layout change.

use doxs_golden::{CorpusManager, GoldenConfig, GoldenTestRunner, SnapshotManager};
use pretty_assertions::assert_eq;
use std::path::PathBuf;

fn corpus_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../golden-corpus")
}

fn runner() -> GoldenTestRunner {
    let mut config = GoldenConfig::from_env().with_corpus_dir(corpus_dir());
    config.diff_options.colored = false;
    GoldenTestRunner::new(config)
}

/// Run all golden tests in the corpus
#[test]
fn golden_test_suite() {
    match runner().run_batch("*") {
        Ok(results) => {
            println!("All {} golden tests passed!", results.len());
        }
        Err(e) => {
            panic!("Golden tests failed: {}", e);
        }
    }
}

/// Rejected records must report the expected violations
#[test]
fn golden_test_errors() {
    let results = runner().run_batch("errors").expect("Error golden tests failed");
    assert_eq!(results.len(), 4);
}

/// Every rendering case has a snapshot and no snapshot is orphaned
#[test]
fn golden_snapshots_cover_corpus() {
    let corpus = CorpusManager::new(corpus_dir());
    let mut expected: Vec<String> = corpus
        .discover_tests()
        .unwrap()
        .into_iter()
        .filter(|t| t.expectations.should_succeed)
        .map(|t| t.id())
        .collect();
    expected.sort();

    let snapshots = SnapshotManager::new(corpus_dir().join("snapshots")).list().unwrap();
    assert_eq!(snapshots, expected);
}

/// The Add case renders exactly, independent of the runner
#[test]
fn golden_add_matches_direct_compile() {
    let corpus = CorpusManager::new(corpus_dir());
    let case = corpus
        .load_test_case(&corpus_dir().join("basic/add/case.json"))
        .unwrap();
    let rendered = doxs_core::compile(&case.input.record).unwrap();
    let snapshot = SnapshotManager::new(corpus_dir().join("snapshots"))
        .load("basic/add")
        .unwrap();
    assert_eq!(rendered, snapshot);
}

// Individual test cases using the macro
mod individual_tests {
    use doxs_golden::golden_test;

    golden_test!(test_add, "basic/add");
    golden_test!(test_sliding_window, "sections/sliding-window");
    golden_test!(test_legacy_checksum, "sections/legacy-checksum");
    golden_test!(test_narrow_equals, "dialect/narrow-equals");
    golden_test!(test_empty_sections, "edge-cases/empty-sections");
}
