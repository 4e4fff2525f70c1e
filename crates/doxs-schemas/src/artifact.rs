//! The published JSON Schema artifact for documentation records
//!
//! Copyright (c) 2025 Doxs Team
//! Licensed under the Apache-2.0 license

use doxs_core::validation::{SchemaValidator, ValidationContext, ValidationError, ValidationErrors, ViolationKind};
use doxs_core::{Error, Result, Schema, SchemaVersion};
use jsonschema::error::ValidationErrorKind;
use jsonschema::Validator;
use serde_json::Value;
use std::sync::OnceLock;
use tracing::debug;

/// Version of the checked-in artifact
pub const RECORD_SCHEMA_VERSION: SchemaVersion = SchemaVersion::new(1, 0, 0);

const RECORD_SCHEMA_SOURCE: &str = include_str!("../../../schemas/doxs-record.schema.json");

static RECORD_SCHEMA: OnceLock<Value> = OnceLock::new();

/// The checked-in record schema document
pub fn record_schema() -> &'static Value {
    RECORD_SCHEMA.get_or_init(|| {
        serde_json::from_str(RECORD_SCHEMA_SOURCE).expect("embedded record schema is valid JSON")
    })
}

/// Validates raw records with a compiled JSON Schema document
pub struct ArtifactValidator {
    validator: Validator,
}

impl std::fmt::Debug for ArtifactValidator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ArtifactValidator").finish_non_exhaustive()
    }
}

impl ArtifactValidator {
    /// Compile the checked-in artifact
    pub fn new() -> Result<Self> {
        Self::from_document(record_schema())
    }

    /// Compile the JSON Schema projection of an alternate schema table
    pub fn for_schema(schema: &Schema) -> Result<Self> {
        Self::from_document(&schema.to_json_schema())
    }

    /// Compile an arbitrary draft 2020-12 document
    pub fn from_document(document: &Value) -> Result<Self> {
        let validator = jsonschema::options()
            .with_draft(jsonschema::Draft::Draft202012)
            .build(document)
            .map_err(|e| Error::configuration(format!("Failed to compile record schema: {}", e)))?;
        Ok(Self { validator })
    }
}

impl SchemaValidator for ArtifactValidator {
    type Input = Value;
    type Output = ();

    fn validate_with_context(
        &self,
        input: &Value,
        context: &ValidationContext,
    ) -> std::result::Result<(), ValidationErrors> {
        let mut collector = context.collector();

        for error in self.validator.iter_errors(input) {
            if collector.is_full() {
                break;
            }
            let pointer = error.instance_path.to_string();
            let message = error.to_string();

            match &error.kind {
                ValidationErrorKind::AdditionalProperties { unexpected } => {
                    for key in unexpected {
                        collector.push(violation(
                            ViolationKind::UnknownSection,
                            context,
                            &format!("{}/{}", pointer, key),
                            key,
                            &message,
                        ));
                    }
                }
                ValidationErrorKind::Required { property } => {
                    let key = property.as_str().unwrap_or_default();
                    collector.push(violation(
                        ViolationKind::MissingRequired,
                        context,
                        &format!("{}/{}", pointer, key),
                        key,
                        &message,
                    ));
                }
                _ => {
                    let key = pointer.rsplit('/').next().unwrap_or_default().to_string();
                    collector.push(violation(ViolationKind::WrongShape, context, &pointer, &key, &message));
                }
            }
        }

        let errors = collector.finish();
        if !errors.is_empty() {
            debug!(violations = errors.len(), "artifact rejected record");
        }
        errors.into_result()
    }
}

fn violation(
    kind: ViolationKind,
    context: &ValidationContext,
    pointer: &str,
    key: &str,
    message: &str,
) -> ValidationError {
    ValidationError::new(kind, pointer_to_path(&context.path, pointer), key, message)
        .with_detail("a record conforming to the JSON Schema artifact", message)
}

/// Convert a JSON pointer (`/parameters/1bad`) into a path below `base`
/// (`$.parameters.1bad`)
pub fn pointer_to_path(base: &str, pointer: &str) -> String {
    let mut path = base.to_string();
    for segment in pointer.split('/').filter(|s| !s.is_empty()) {
        let segment = segment.replace("~1", "/").replace("~0", "~");
        if segment.bytes().all(|b| b.is_ascii_digit()) {
            path.push_str(&format!("[{}]", segment));
        } else {
            path.push('.');
            path.push_str(&segment);
        }
    }
    path
}
