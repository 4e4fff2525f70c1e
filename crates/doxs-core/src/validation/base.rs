//! Base validation trait and common utilities

use crate::validation::error::{ValidationError, ValidationErrors};
use serde::{Deserialize, Serialize};

/// How many violations a validation run collects
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidationConfig {
    /// Whether to stop on first error or collect all errors
    pub fail_fast: bool,
    /// Maximum number of errors to collect (0 = unlimited)
    pub max_errors: usize,
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            fail_fast: false,
            max_errors: 0,
        }
    }
}

impl ValidationConfig {
    /// Enable fail-fast mode
    pub fn with_fail_fast(mut self) -> Self {
        self.fail_fast = true;
        self
    }

    /// Set maximum number of errors to collect
    pub fn with_max_errors(mut self, max_errors: usize) -> Self {
        self.max_errors = max_errors;
        self
    }

    /// Upper bound on collected errors, if any
    pub fn limit(&self) -> Option<usize> {
        if self.fail_fast {
            Some(1)
        } else if self.max_errors > 0 {
            Some(self.max_errors)
        } else {
            None
        }
    }
}

/// Location and limits for one validation run
#[derive(Debug, Clone)]
pub struct ValidationContext {
    /// Current JSON path
    pub path: String,
    pub config: ValidationConfig,
}

impl ValidationContext {
    pub fn new(config: ValidationConfig) -> Self {
        Self {
            path: "$".to_string(),
            config,
        }
    }

    /// Create a child context with updated path
    pub fn child<P: AsRef<str>>(&self, path_segment: P) -> Self {
        let new_path = if self.path == "$" {
            format!("$.{}", path_segment.as_ref())
        } else {
            format!("{}.{}", self.path, path_segment.as_ref())
        };

        Self {
            path: new_path,
            config: self.config,
        }
    }

    /// Create a child context for array index
    pub fn child_index(&self, index: usize) -> Self {
        Self {
            path: format!("{}[{}]", self.path, index),
            config: self.config,
        }
    }

    /// Start collecting errors under this context's limits
    pub fn collector(&self) -> ErrorCollector {
        ErrorCollector {
            errors: ValidationErrors::new(),
            limit: self.config.limit(),
        }
    }
}

impl Default for ValidationContext {
    fn default() -> Self {
        Self::new(ValidationConfig::default())
    }
}

/// Accumulates errors until the configured limit is reached
#[derive(Debug)]
pub struct ErrorCollector {
    errors: ValidationErrors,
    limit: Option<usize>,
}

impl ErrorCollector {
    /// Record an error unless the limit is already reached
    pub fn push(&mut self, error: ValidationError) {
        if !self.is_full() {
            self.errors.add(error);
        }
    }

    /// Record several errors, respecting the limit
    pub fn extend(&mut self, errors: ValidationErrors) {
        for error in errors {
            self.push(error);
        }
    }

    /// Whether further checks can be skipped
    pub fn is_full(&self) -> bool {
        matches!(self.limit, Some(limit) if self.errors.len() >= limit)
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn finish(self) -> ValidationErrors {
        self.errors
    }
}

/// Base trait for schema validators
pub trait SchemaValidator {
    /// The type being validated
    type Input: ?Sized;
    /// What a successful validation produces
    type Output;

    /// Validate, collecting every violation
    fn validate(&self, input: &Self::Input) -> Result<Self::Output, ValidationErrors> {
        self.validate_with_context(input, &ValidationContext::default())
    }

    /// Validate with a specific path and error limit
    fn validate_with_context(
        &self,
        input: &Self::Input,
        context: &ValidationContext,
    ) -> Result<Self::Output, ValidationErrors>;

    /// Collect all validation errors (non-failing)
    fn collect_errors(&self, input: &Self::Input) -> ValidationErrors {
        match self.validate(input) {
            Ok(_) => ValidationErrors::new(),
            Err(errors) => errors,
        }
    }

    fn is_valid(&self, input: &Self::Input) -> bool {
        self.validate(input).is_ok()
    }
}

/// Validate many inputs, prefixing paths with their index
pub fn validate_batch<V>(
    validator: &V,
    inputs: &[V::Input],
    config: &ValidationConfig,
) -> Result<Vec<V::Output>, ValidationErrors>
where
    V: SchemaValidator,
    V::Input: Sized,
{
    let context = ValidationContext::new(*config);
    let mut collector = context.collector();
    let mut outputs = Vec::with_capacity(inputs.len());

    for (i, input) in inputs.iter().enumerate() {
        if collector.is_full() {
            break;
        }
        match validator.validate_with_context(input, &context.child_index(i)) {
            Ok(output) => outputs.push(output),
            Err(errors) => collector.extend(errors),
        }
    }

    if collector.is_empty() {
        Ok(outputs)
    } else {
        Err(collector.finish())
    }
}

/// Name of a JSON value's type, for error messages
pub fn json_type_name(value: &serde_json::Value) -> &'static str {
    use serde_json::Value;
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "mapping",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::error::ViolationKind;
    use serde_json::json;

    #[test]
    fn test_validation_context_child() {
        let context = ValidationContext::default();
        let child = context.child("parameters");
        assert_eq!(child.path, "$.parameters");

        let grandchild = child.child("x");
        assert_eq!(grandchild.path, "$.parameters.x");
    }

    #[test]
    fn test_validation_context_child_index() {
        let context = ValidationContext::default().child("see_also");
        assert_eq!(context.child_index(0).path, "$.see_also[0]");
        assert_eq!(ValidationContext::default().child_index(2).child("title").path, "$[2].title");
    }

    #[test]
    fn test_validation_config_limits() {
        assert_eq!(ValidationConfig::default().limit(), None);
        assert_eq!(ValidationConfig::default().with_fail_fast().limit(), Some(1));
        assert_eq!(ValidationConfig::default().with_max_errors(3).limit(), Some(3));
    }

    #[test]
    fn test_collector_respects_limit() {
        let context = ValidationContext::new(ValidationConfig::default().with_max_errors(2));
        let mut collector = context.collector();
        for key in ["a", "b", "c"] {
            collector.push(ValidationError::new(ViolationKind::UnknownSection, "$", key, key));
        }
        assert!(collector.is_full());
        assert_eq!(collector.finish().len(), 2);
    }

    #[test]
    fn test_json_type_name() {
        assert_eq!(json_type_name(&json!(null)), "null");
        assert_eq!(json_type_name(&json!(1)), "number");
        assert_eq!(json_type_name(&json!({})), "mapping");
        assert_eq!(json_type_name(&json!([])), "array");
    }
}
