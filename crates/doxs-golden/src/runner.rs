//! Golden test runner for executing snapshot tests

use crate::{
    corpus::{CorpusManager, TestCase, CASE_FILE},
    diff::DiffEngine,
    snapshot::SnapshotManager,
    GoldenConfig, GoldenError, Result,
};
use colored::*;
use doxs_core::{Error as DoxsError, Pipeline, Schema};
use std::time::Instant;

/// Result of running a golden test
#[derive(Debug)]
pub struct TestResult {
    /// Name of the test
    pub name: String,

    /// Whether the test passed
    pub passed: bool,

    /// Error message if failed
    pub error: Option<String>,

    /// Diff output if comparison failed
    pub diff: Option<String>,

    /// Execution time in milliseconds
    pub duration_ms: u64,

    /// Whether snapshot was updated
    pub updated: bool,
}

impl TestResult {
    fn failed(name: &str, error: String, duration_ms: u64) -> Self {
        Self {
            name: name.to_string(),
            passed: false,
            error: Some(error),
            diff: None,
            duration_ms,
            updated: false,
        }
    }

    /// Print the test result
    pub fn print(&self, verbose: bool) {
        let status = if self.passed {
            "PASS".green().bold()
        } else {
            "FAIL".red().bold()
        };

        println!("{} {} ({}ms)", status, self.name, self.duration_ms);

        if let Some(ref error) = self.error {
            println!("  {}: {}", "Error".red(), error);
        }

        if verbose || !self.passed {
            if let Some(ref diff) = self.diff {
                println!("{}", diff);
            }
        }

        if self.updated {
            println!("  {}", "Snapshot updated".yellow());
        }
    }
}

/// Runner for golden tests
pub struct GoldenTestRunner {
    config: GoldenConfig,
    corpus_manager: CorpusManager,
    snapshot_manager: SnapshotManager,
}

impl GoldenTestRunner {
    /// Create a new test runner
    pub fn new(config: GoldenConfig) -> Self {
        let corpus_manager = CorpusManager::new(&config.corpus_dir);
        let snapshot_manager = SnapshotManager::new(&config.snapshot_dir);

        Self {
            config,
            corpus_manager,
            snapshot_manager,
        }
    }

    /// Run a single test by `category/name`
    pub fn run_test(&self, test_name: &str) -> Result<TestResult> {
        let start = Instant::now();

        let test_path = self.config.corpus_dir.join(test_name).join(CASE_FILE);
        let test_case = self.corpus_manager.load_test_case(&test_path)?;

        let result = self.execute_test(&test_case);
        let duration_ms = start.elapsed().as_millis() as u64;

        let test_result = match result {
            Ok((passed, diff, updated)) => TestResult {
                name: test_name.to_string(),
                passed,
                error: if passed { None } else { Some("Snapshot mismatch".to_string()) },
                diff,
                duration_ms,
                updated,
            },
            Err(e) => TestResult::failed(test_name, e.to_string(), duration_ms),
        };

        if self.config.verbose {
            test_result.print(true);
        }

        if test_result.passed {
            Ok(test_result)
        } else {
            Err(GoldenError::TestFailed(format!(
                "Test '{}' failed: {}{}",
                test_name,
                test_result.error.as_deref().unwrap_or("Unknown error"),
                test_result
                    .diff
                    .as_deref()
                    .map(|d| format!("\n{}", d))
                    .unwrap_or_default()
            )))
        }
    }

    /// Run every enabled test whose name or category contains `pattern`
    /// (`*` runs all)
    pub fn run_batch(&self, pattern: &str) -> Result<Vec<TestResult>> {
        let mut results = Vec::new();

        let tests = self.corpus_manager.discover_tests()?;

        let filtered_tests: Vec<_> = if pattern == "*" {
            tests
        } else {
            tests
                .into_iter()
                .filter(|t| t.name.contains(pattern) || t.category.contains(pattern))
                .collect()
        };

        if filtered_tests.is_empty() {
            return Err(GoldenError::CorpusError(format!(
                "No tests found matching pattern '{}'",
                pattern
            )));
        }

        println!("Running {} tests...\n", filtered_tests.len());

        let mut passed = 0;
        let mut failed = 0;

        for test_case in filtered_tests {
            let test_name = test_case.id();
            let result = self
                .run_test(&test_name)
                .unwrap_or_else(|e| TestResult::failed(&test_name, e.to_string(), 0));

            if result.passed {
                passed += 1;
            } else {
                failed += 1;
            }

            result.print(self.config.verbose);
            results.push(result);
        }

        println!("\n{}", "=== Test Summary ===".bold());
        println!(
            "{}: {} passed, {} failed",
            "Results".bold(),
            passed.to_string().green(),
            failed.to_string().red()
        );

        if failed > 0 {
            let names: Vec<&str> = results
                .iter()
                .filter(|r| !r.passed)
                .map(|r| r.name.as_str())
                .collect();
            Err(GoldenError::TestFailed(format!(
                "{} test(s) failed: {}",
                failed,
                names.join(", ")
            )))
        } else {
            Ok(results)
        }
    }

    /// Execute a single test case
    fn execute_test(&self, test_case: &TestCase) -> Result<(bool, Option<String>, bool)> {
        if !test_case.metadata.enabled {
            return Ok((true, None, false));
        }

        let compiled = self.compile(test_case)?;

        if !test_case.expectations.should_succeed {
            return match compiled {
                Ok(rendered) => Err(GoldenError::TestFailed(format!(
                    "Expected the record to be rejected, but it rendered:\n{}",
                    rendered
                ))),
                Err(error) => {
                    Self::check_rejection(test_case, &error)?;
                    Ok((true, None, false))
                }
            };
        }

        let rendered = compiled
            .map_err(|e| GoldenError::TestFailed(format!("Compilation failed: {}", e)))?;

        let snapshot_name = test_case.id();

        if !self.snapshot_manager.exists(&snapshot_name) {
            if self.config.update_snapshots {
                self.snapshot_manager.create(&snapshot_name, &rendered)?;
                return Ok((true, None, true));
            } else {
                return Err(GoldenError::SnapshotMismatch(format!(
                    "Snapshot '{}' does not exist. Run with UPDATE_GOLDEN=1 to create it.",
                    snapshot_name
                )));
            }
        }

        let expected = self.snapshot_manager.load(&snapshot_name)?;
        let diff_engine = DiffEngine::new(self.config.diff_options.clone());
        let diff_result = diff_engine.compare(&expected, &rendered);

        if diff_result.matches {
            Ok((true, None, false))
        } else if self.config.update_snapshots {
            self.snapshot_manager.update(&snapshot_name, &rendered)?;
            Ok((true, Some(diff_result.diff_output), true))
        } else {
            Ok((false, Some(diff_result.diff_output), false))
        }
    }

    /// Run the case's record through a pipeline built from its dialect
    fn compile(&self, test_case: &TestCase) -> Result<doxs_core::Result<String>> {
        let dialect = test_case
            .input
            .dialect
            .clone()
            .unwrap_or_else(|| self.config.dialect.clone());
        let pipeline = Pipeline::new(Schema::standard(), dialect)
            .map_err(|e| GoldenError::CorpusError(format!("Invalid dialect: {}", e)))?;
        Ok(pipeline.compile(&test_case.input.record))
    }

    /// Check a rejection against the expected error pattern and violations
    fn check_rejection(test_case: &TestCase, error: &DoxsError) -> Result<()> {
        let message = error.to_string();

        if let Some(pattern) = &test_case.expectations.error_pattern {
            if !message.contains(pattern.as_str()) {
                return Err(GoldenError::TestFailed(format!(
                    "Error did not contain '{}': {}",
                    pattern, message
                )));
            }
        }

        let violations = error.violations();
        for key in &test_case.expectations.violations {
            if !violations.is_some_and(|v| v.names_key(key)) {
                return Err(GoldenError::TestFailed(format!(
                    "No violation named '{}': {}",
                    key, message
                )));
            }
        }

        Ok(())
    }

    /// Initialize the corpus with sample tests
    pub fn init_corpus(&self) -> Result<()> {
        self.corpus_manager.init_corpus()
    }

    /// List all available tests
    pub fn list_tests(&self) -> Result<Vec<String>> {
        let tests = self.corpus_manager.discover_tests()?;
        Ok(tests.into_iter().map(|t| t.id()).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::DiffOptions;
    use std::fs;
    use tempfile::TempDir;

    fn config(dir: &TempDir, update: bool) -> GoldenConfig {
        let mut config = GoldenConfig::default().with_corpus_dir(dir.path());
        config.update_snapshots = update;
        config.diff_options = DiffOptions {
            colored: false,
            ..DiffOptions::default()
        };
        config
    }

    #[test]
    fn test_runner_creation() {
        let temp_dir = TempDir::new().unwrap();
        let runner = GoldenTestRunner::new(config(&temp_dir, false));
        runner.init_corpus().unwrap();

        let tests = runner.list_tests().unwrap();
        assert_eq!(tests, vec!["basic/add"]);
    }

    #[test]
    fn test_missing_snapshot_fails_without_update() {
        let temp_dir = TempDir::new().unwrap();
        let runner = GoldenTestRunner::new(config(&temp_dir, false));
        runner.init_corpus().unwrap();

        let err = runner.run_test("basic/add").unwrap_err();
        assert!(err.to_string().contains("UPDATE_GOLDEN=1"));
    }

    #[test]
    fn test_update_creates_then_matches() {
        let temp_dir = TempDir::new().unwrap();
        GoldenTestRunner::new(config(&temp_dir, true)).init_corpus().unwrap();

        let created = GoldenTestRunner::new(config(&temp_dir, true))
            .run_test("basic/add")
            .unwrap();
        assert!(created.updated);

        let snapshot = fs::read_to_string(temp_dir.path().join("snapshots/basic/add.txt")).unwrap();
        assert!(snapshot.starts_with("Add\n\nAdds two numbers.\n"));

        let checked = GoldenTestRunner::new(config(&temp_dir, false))
            .run_test("basic/add")
            .unwrap();
        assert!(checked.passed && !checked.updated);
    }

    #[test]
    fn test_config_dialect_applies_without_override() {
        let temp_dir = TempDir::new().unwrap();
        let config = config(&temp_dir, true)
            .with_dialect(doxs_core::DialectConfig::numpy().with_underline('='));
        let runner = GoldenTestRunner::new(config);
        runner.init_corpus().unwrap();
        runner.run_test("basic/add").unwrap();

        let snapshot = fs::read_to_string(temp_dir.path().join("snapshots/basic/add.txt")).unwrap();
        assert!(snapshot.contains("Parameters\n==========\n"));
    }

    #[test]
    fn test_mismatch_reports_diff() {
        let temp_dir = TempDir::new().unwrap();
        let runner = GoldenTestRunner::new(config(&temp_dir, false));
        runner.init_corpus().unwrap();
        fs::create_dir_all(temp_dir.path().join("snapshots/basic")).unwrap();
        fs::write(temp_dir.path().join("snapshots/basic/add.txt"), "Subtract\n").unwrap();

        let err = runner.run_test("basic/add").unwrap_err().to_string();
        assert!(err.contains("Snapshot mismatch"));
        assert!(err.contains("-Subtract"));
    }

    #[test]
    fn test_rejection_case() {
        let temp_dir = TempDir::new().unwrap();
        let case_dir = temp_dir.path().join("errors/bogus");
        fs::create_dir_all(&case_dir).unwrap();
        fs::write(
            case_dir.join(CASE_FILE),
            r#"{
                "name": "bogus",
                "category": "errors",
                "input": {"record": {"title": "x", "bogus": "y"}},
                "expectations": {
                    "should_succeed": false,
                    "error_pattern": "Unknown section 'bogus'",
                    "violations": ["bogus"]
                },
                "metadata": {"description": "Unknown top-level key"}
            }"#,
        )
        .unwrap();

        let runner = GoldenTestRunner::new(config(&temp_dir, false));
        assert!(runner.run_test("errors/bogus").unwrap().passed);
        assert_eq!(runner.run_batch("errors").unwrap().len(), 1);
        assert!(runner.run_batch("nothing-matches").is_err());
    }
}
