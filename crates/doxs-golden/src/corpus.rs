//! Test corpus management for golden tests

use crate::{GoldenError, Result};
use doxs_core::DialectConfig;
use doxs_schemas::RecordLoader;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// File name of a case definition inside its directory
pub const CASE_FILE: &str = "case.json";

/// A test case in the corpus
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TestCase {
    /// Name of the test case
    pub name: String,

    /// Category/group of the test
    pub category: String,

    /// Record and rendering options
    pub input: TestInput,

    /// Expected behavior configuration
    pub expectations: TestExpectations,

    /// Test metadata
    pub metadata: TestMetadata,
}

impl TestCase {
    /// `category/name`, also the snapshot name
    pub fn id(&self) -> String {
        format!("{}/{}", self.category, self.name)
    }
}

/// Input for a test case
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TestInput {
    /// The raw record, or the name of a YAML/JSON file beside the case
    pub record: Value,

    /// Dialect override; the NumPy defaults otherwise
    #[serde(default)]
    pub dialect: Option<DialectConfig>,
}

/// Expected behavior for a test
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TestExpectations {
    /// Whether the record should compile
    pub should_succeed: bool,

    /// Text the error message must contain if should_succeed is false
    pub error_pattern: Option<String>,

    /// Keys the reported violations must name
    #[serde(default)]
    pub violations: Vec<String>,
}

/// Metadata about a test case
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TestMetadata {
    /// Description of what this tests
    pub description: String,

    /// Tags for categorization
    #[serde(default)]
    pub tags: Vec<String>,

    /// Whether this test is enabled
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Priority level (lower = higher priority)
    #[serde(default = "default_priority")]
    pub priority: u32,
}

fn default_true() -> bool {
    true
}

fn default_priority() -> u32 {
    100
}

/// Manages the test corpus
pub struct CorpusManager {
    corpus_dir: PathBuf,
    loader: RecordLoader,
}

impl CorpusManager {
    /// Create a new corpus manager
    pub fn new(corpus_dir: impl AsRef<Path>) -> Self {
        Self {
            corpus_dir: corpus_dir.as_ref().to_path_buf(),
            loader: RecordLoader::new(),
        }
    }

    /// Discover all test cases in the corpus
    pub fn discover_tests(&self) -> Result<Vec<TestCase>> {
        let mut tests = Vec::new();

        if !self.corpus_dir.exists() {
            return Ok(tests);
        }

        for entry in WalkDir::new(&self.corpus_dir)
            .follow_links(false)
            .sort_by_file_name()
            .into_iter()
            .filter_map(|e| e.ok())
        {
            let path = entry.path();

            if path.is_file() && path.file_name() == Some(std::ffi::OsStr::new(CASE_FILE)) {
                match self.load_test_case(path) {
                    Ok(test_case) => tests.push(test_case),
                    Err(e) => {
                        eprintln!("Warning: Failed to load test case {:?}: {}", path, e);
                    }
                }
            }
        }

        // Stable sort keeps file-name order within a priority
        tests.sort_by_key(|t| t.metadata.priority);

        Ok(tests)
    }

    /// Load a specific test case, resolving a record file reference
    pub fn load_test_case(&self, path: &Path) -> Result<TestCase> {
        let content = fs::read_to_string(path)?;
        let mut test_case: TestCase = serde_json::from_str(&content)?;

        let test_dir = path.parent().ok_or_else(|| {
            GoldenError::CorpusError(format!("Test case {:?} has no parent directory", path))
        })?;

        if let Value::String(ref filename) = test_case.input.record {
            let record_path = test_dir.join(filename);
            test_case.input.record = self.loader.parse_file(&record_path)?;
        }

        Ok(test_case)
    }

    /// Create the corpus directory structure
    pub fn init_corpus(&self) -> Result<()> {
        let dirs = ["basic", "sections", "dialect", "errors", "edge-cases"];

        for dir in &dirs {
            fs::create_dir_all(self.corpus_dir.join(dir))?;
        }

        self.create_sample_test()?;

        Ok(())
    }

    /// Create a sample test case
    fn create_sample_test(&self) -> Result<()> {
        let test_dir = self.corpus_dir.join("basic/add");
        fs::create_dir_all(&test_dir)?;

        let test_case = TestCase {
            name: "add".to_string(),
            category: "basic".to_string(),
            input: TestInput {
                record: serde_json::json!({
                    "title": "Add",
                    "summary": "Adds two numbers.",
                    "parameters": {
                        "a": "first operand",
                        "b": "second operand"
                    },
                    "returns": "the sum"
                }),
                dialect: None,
            },
            expectations: TestExpectations {
                should_succeed: true,
                error_pattern: None,
                violations: vec![],
            },
            metadata: TestMetadata {
                description: "Function with parameters and a return value".to_string(),
                tags: vec!["basic".to_string(), "smoke".to_string()],
                enabled: true,
                priority: 1,
            },
        };

        let content = serde_json::to_string_pretty(&test_case)?;
        fs::write(test_dir.join(CASE_FILE), content)?;

        Ok(())
    }
}
