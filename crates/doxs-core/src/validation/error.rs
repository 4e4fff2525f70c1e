//! Validation error types for documentation records

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Which schema constraint a record violated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ViolationKind {
    /// Top-level key outside the section vocabulary
    UnknownSection,
    /// A required section is absent or null
    MissingRequired,
    /// A required text section is blank
    EmptyRequired,
    /// Key of an identifier-keyed section does not match the identifier pattern
    InvalidIdentifier,
    /// Content has the wrong shape for its section
    WrongShape,
}

impl ViolationKind {
    /// Stable rule name used in [`Violation::rule`]
    pub fn rule(&self) -> &'static str {
        match self {
            ViolationKind::UnknownSection => "additional_properties",
            ViolationKind::MissingRequired => "required",
            ViolationKind::EmptyRequired => "non_empty",
            ViolationKind::InvalidIdentifier => "identifier_pattern",
            ViolationKind::WrongShape => "section_shape",
        }
    }
}

/// A validation violation with detailed context
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Violation {
    /// The validation rule that was violated
    pub rule: String,
    /// What was expected
    pub expected: String,
    /// What was actually found
    pub actual: String,
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Rule '{}' violated: expected {}, but found {}",
            self.rule, self.expected, self.actual
        )
    }
}

/// A single schema violation with its location in the raw record
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
pub struct ValidationError {
    pub kind: ViolationKind,
    /// JSON path of the offending value, e.g. `$.parameters.1bad`
    pub path: String,
    /// The offending key
    pub key: String,
    /// Human-readable reason
    pub message: String,
    pub schema_violations: Vec<Violation>,
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Validation error at '{}': {}", self.path, self.message)?;

        if !self.schema_violations.is_empty() {
            write!(f, "\nViolations:")?;
            for violation in &self.schema_violations {
                write!(f, "\n  - {}", violation)?;
            }
        }

        Ok(())
    }
}

impl ValidationError {
    /// Create a new validation error
    pub fn new<P, K, M>(kind: ViolationKind, path: P, key: K, message: M) -> Self
    where
        P: Into<String>,
        K: Into<String>,
        M: Into<String>,
    {
        Self {
            kind,
            path: path.into(),
            key: key.into(),
            message: message.into(),
            schema_violations: Vec::new(),
        }
    }

    /// Attach an expected/actual detail for this error's rule
    pub fn with_detail<E, A>(mut self, expected: E, actual: A) -> Self
    where
        E: Into<String>,
        A: Into<String>,
    {
        let violation = Self::create_violation(self.kind.rule(), expected, actual);
        self.schema_violations.push(violation);
        self
    }

    /// Add a violation to this error
    pub fn add_violation(&mut self, violation: Violation) {
        self.schema_violations.push(violation);
    }

    /// Create a violation for a specific rule
    pub fn create_violation<R, E, A>(rule: R, expected: E, actual: A) -> Violation
    where
        R: Into<String>,
        E: Into<String>,
        A: Into<String>,
    {
        Violation {
            rule: rule.into(),
            expected: expected.into(),
            actual: actual.into(),
        }
    }
}

/// Every violation found in one validation run
#[derive(Debug, Clone, Default, PartialEq, Eq, Error, Serialize, Deserialize)]
pub struct ValidationErrors {
    pub errors: Vec<ValidationError>,
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.errors.as_slice() {
            [single] => write!(f, "{}", single),
            errors => {
                write!(f, "{} validation errors occurred:", errors.len())?;
                for (i, error) in errors.iter().enumerate() {
                    write!(f, "\n{}. {}", i + 1, error)?;
                }
                Ok(())
            }
        }
    }
}

impl ValidationErrors {
    pub fn new() -> Self {
        Self { errors: Vec::new() }
    }

    pub fn add(&mut self, error: ValidationError) {
        self.errors.push(error);
    }

    pub fn extend(&mut self, other: ValidationErrors) {
        self.errors.extend(other.errors);
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ValidationError> {
        self.errors.iter()
    }

    /// Whether any violation names `key`
    pub fn names_key(&self, key: &str) -> bool {
        self.errors.iter().any(|e| e.key == key)
    }

    /// Whether any violation is of the given kind
    pub fn has_kind(&self, kind: ViolationKind) -> bool {
        self.errors.iter().any(|e| e.kind == kind)
    }

    /// Ok if no errors were collected
    pub fn into_result(self) -> Result<(), Self> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

impl From<ValidationError> for ValidationErrors {
    fn from(error: ValidationError) -> Self {
        Self {
            errors: vec![error],
        }
    }
}

impl From<Vec<ValidationError>> for ValidationErrors {
    fn from(errors: Vec<ValidationError>) -> Self {
        Self { errors }
    }
}

impl IntoIterator for ValidationErrors {
    type Item = ValidationError;
    type IntoIter = std::vec::IntoIter<ValidationError>;

    fn into_iter(self) -> Self::IntoIter {
        self.errors.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unknown(key: &str) -> ValidationError {
        ValidationError::new(
            ViolationKind::UnknownSection,
            format!("$.{}", key),
            key,
            format!("Unknown section '{}'", key),
        )
        .with_detail("a recognized section name", key)
    }

    #[test]
    fn test_single_error_display() {
        let errors = ValidationErrors::from(unknown("bogus"));
        let text = errors.to_string();
        assert!(text.starts_with("Validation error at '$.bogus'"));
        assert!(text.contains("Rule 'additional_properties' violated"));
    }

    #[test]
    fn test_multiple_errors_display() {
        let errors = ValidationErrors::from(vec![unknown("a"), unknown("b")]);
        let text = errors.to_string();
        assert!(text.starts_with("2 validation errors occurred:"));
        assert!(text.contains("\n2. Validation error at '$.b'"));
    }

    #[test]
    fn test_lookup_helpers() {
        let mut errors = ValidationErrors::new();
        assert!(errors.clone().into_result().is_ok());

        errors.add(unknown("bogus"));
        assert!(errors.names_key("bogus"));
        assert!(!errors.names_key("title"));
        assert!(errors.has_kind(ViolationKind::UnknownSection));
        assert!(!errors.has_kind(ViolationKind::WrongShape));
        assert!(errors.into_result().is_err());
    }
}
