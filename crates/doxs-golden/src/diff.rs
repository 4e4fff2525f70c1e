//! Line diffs between expected and rendered docstrings

use crate::snapshot::normalize_text;
use colored::*;
use similar::{ChangeTag, TextDiff};

/// Options for diff comparison
#[derive(Debug, Clone)]
pub struct DiffOptions {
    /// Whether to use colored output
    pub colored: bool,

    /// Context lines to show around changes
    pub context_lines: usize,

    /// Normalize line endings and trailing newlines before comparing
    pub normalize: bool,

    /// Whether to show full diff or just the changes with context
    pub full_diff: bool,

    /// Maximum diff lines to show (0 = unlimited)
    pub max_diff_lines: usize,
}

impl Default for DiffOptions {
    fn default() -> Self {
        Self {
            colored: true,
            context_lines: 3,
            normalize: true,
            full_diff: false,
            max_diff_lines: 100,
        }
    }
}

/// Result of a diff operation
#[derive(Debug)]
pub struct DiffResult {
    /// Whether the texts match
    pub matches: bool,

    /// Human-readable diff output
    pub diff_output: String,

    /// Summary of changes
    pub summary: DiffSummary,
}

/// Summary of diff changes
#[derive(Debug, Default, PartialEq, Eq)]
pub struct DiffSummary {
    /// Number of added lines
    pub added: usize,

    /// Number of removed lines
    pub removed: usize,

    /// 1-based line numbers in the expected text that changed
    pub changed_lines: Vec<usize>,
}

/// Engine for comparing rendered docstrings
pub struct DiffEngine {
    options: DiffOptions,
}

impl DiffEngine {
    /// Create a new diff engine
    pub fn new(options: DiffOptions) -> Self {
        Self { options }
    }

    /// Compare expected snapshot text with actual output
    pub fn compare(&self, expected: &str, actual: &str) -> DiffResult {
        let (expected, actual) = if self.options.normalize {
            (normalize_text(expected), normalize_text(actual))
        } else {
            (expected.to_string(), actual.to_string())
        };

        if expected == actual {
            return DiffResult {
                matches: true,
                diff_output: String::new(),
                summary: DiffSummary::default(),
            };
        }

        let text_diff = TextDiff::from_lines(&expected, &actual);

        DiffResult {
            matches: false,
            diff_output: self.generate_diff_output(&text_diff),
            summary: Self::collect_diff_summary(&text_diff),
        }
    }

    fn generate_diff_output(&self, text_diff: &TextDiff<'_, '_, '_, str>) -> String {
        let mut output = String::new();

        if self.options.colored {
            output.push_str(&"=== Diff Output ===\n".bold().to_string());
        } else {
            output.push_str("=== Diff Output ===\n");
        }

        let mut line_count = 0;
        let groups = if self.options.full_diff {
            vec![text_diff.ops().to_vec()]
        } else {
            text_diff.grouped_ops(self.options.context_lines)
        };

        'groups: for (i, group) in groups.iter().enumerate() {
            if i > 0 {
                output.push_str("...\n");
            }
            for op in group {
                for change in text_diff.iter_changes(op) {
                    if self.options.max_diff_lines > 0 && line_count >= self.options.max_diff_lines {
                        output.push_str("... (diff truncated) ...\n");
                        break 'groups;
                    }

                    let line = match change.tag() {
                        ChangeTag::Delete if self.options.colored => {
                            format!("{}{}", "-".red(), change.to_string().red())
                        }
                        ChangeTag::Delete => format!("-{}", change),
                        ChangeTag::Insert if self.options.colored => {
                            format!("{}{}", "+".green(), change.to_string().green())
                        }
                        ChangeTag::Insert => format!("+{}", change),
                        ChangeTag::Equal => format!(" {}", change),
                    };

                    output.push_str(&line);
                    if change.missing_newline() {
                        output.push('\n');
                    }
                    line_count += 1;
                }
            }
        }

        output
    }

    /// Collect summary of differences
    fn collect_diff_summary<'a>(text_diff: &TextDiff<'a, 'a, 'a, str>) -> DiffSummary {
        let mut summary = DiffSummary::default();

        for change in text_diff.iter_all_changes() {
            match change.tag() {
                ChangeTag::Delete => {
                    summary.removed += 1;
                    if let Some(index) = change.old_index() {
                        summary.changed_lines.push(index + 1);
                    }
                }
                ChangeTag::Insert => summary.added += 1,
                ChangeTag::Equal => {}
            }
        }

        summary
    }
}

impl Default for DiffEngine {
    fn default() -> Self {
        Self::new(DiffOptions::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plain() -> DiffEngine {
        DiffEngine::new(DiffOptions {
            colored: false,
            ..DiffOptions::default()
        })
    }

    #[test]
    fn test_identical_text_matches() {
        let result = plain().compare("Add\n\nReturns\n-------\nthe sum\n", "Add\n\nReturns\n-------\nthe sum\n");
        assert!(result.matches);
        assert!(result.diff_output.is_empty());
    }

    #[test]
    fn test_line_endings_normalized() {
        assert!(plain().compare("a\r\nb\r\n", "a\nb").matches);

        let strict = DiffEngine::new(DiffOptions {
            colored: false,
            normalize: false,
            ..DiffOptions::default()
        });
        assert!(!strict.compare("a\r\nb\r\n", "a\nb").matches);
    }

    #[test]
    fn test_changed_line_reported() {
        let result = plain().compare("Add\n\nthe sum\n", "Add\n\nthe total\n");
        assert!(!result.matches);
        assert!(result.diff_output.contains("-the sum\n"));
        assert!(result.diff_output.contains("+the total\n"));
        assert_eq!(result.summary.added, 1);
        assert_eq!(result.summary.removed, 1);
        assert_eq!(result.summary.changed_lines, vec![3]);
    }

    #[test]
    fn test_truncation() {
        let engine = DiffEngine::new(DiffOptions {
            colored: false,
            max_diff_lines: 2,
            ..DiffOptions::default()
        });
        let expected: String = (0..10).map(|i| format!("{}\n", i)).collect();
        let actual: String = (10..20).map(|i| format!("{}\n", i)).collect();
        let result = engine.compare(&expected, &actual);
        assert!(result.diff_output.ends_with("... (diff truncated) ...\n"));
    }
}
