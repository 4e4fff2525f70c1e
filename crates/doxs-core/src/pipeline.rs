//! Validate-then-render pipeline

use crate::error::Result;
use crate::render::{DialectConfig, Renderer};
use crate::schema::Schema;
use crate::types::DocRecord;
use crate::validation::{validate_batch, RecordValidator, SchemaValidator, ValidationConfig, ValidationContext};
use serde_json::Value;
use tracing::debug;

/// Turns raw mappings into docstrings
#[derive(Debug, Clone)]
pub struct Pipeline<'s> {
    validator: RecordValidator<'s>,
    renderer: Renderer<'s>,
    validation: ValidationConfig,
}

impl<'s> Pipeline<'s> {
    /// Build a pipeline, rejecting an invalid dialect
    pub fn new(schema: &'s Schema, dialect: DialectConfig) -> Result<Self> {
        Ok(Self {
            validator: RecordValidator::new(schema),
            renderer: Renderer::new(schema, dialect)?,
            validation: ValidationConfig::default(),
        })
    }

    pub fn with_validation_config(mut self, config: ValidationConfig) -> Self {
        self.validation = config;
        self
    }

    pub fn schema(&self) -> &'s Schema {
        self.validator.schema()
    }

    pub fn dialect(&self) -> &DialectConfig {
        self.renderer.dialect()
    }

    /// Validate a raw mapping into a record
    pub fn validate(&self, raw: &Value) -> Result<DocRecord> {
        let context = ValidationContext::new(self.validation);
        let record = self.validator.validate_with_context(raw, &context)?;
        Ok(record)
    }

    pub fn render(&self, record: &DocRecord) -> Result<String> {
        self.renderer.render(record)
    }

    /// Validate and render one raw mapping
    pub fn compile(&self, raw: &Value) -> Result<String> {
        let record = self.validate(raw)?;
        let out = self.render(&record)?;
        debug!(
            sections = record.len(),
            bytes = out.len(),
            "compiled docstring"
        );
        Ok(out)
    }

    /// Compile many mappings. Every record is validated before any is
    /// rendered, and violations carry the record index in their path.
    pub fn compile_batch(&self, raws: &[Value]) -> Result<Vec<String>> {
        let records = validate_batch(&self.validator, raws, &self.validation)?;
        debug!(records = records.len(), "validated batch");
        records.iter().map(|record| self.render(record)).collect()
    }
}

impl Pipeline<'static> {
    /// Standard schema with the NumPy dialect
    pub fn standard() -> Self {
        Self {
            validator: RecordValidator::new(Schema::standard()),
            renderer: Renderer::numpy(Schema::standard()),
            validation: ValidationConfig::default(),
        }
    }
}

/// Compile a raw mapping with the standard schema and the NumPy dialect
pub fn compile(raw: &Value) -> Result<String> {
    Pipeline::standard().compile(raw)
}
