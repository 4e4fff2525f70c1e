//! Schema validation for documentation records
//!
//! The validator checks a raw mapping against a [`Schema`](crate::Schema):
//! unknown top-level keys are rejected, `title` is mandatory, identifier-keyed
//! sections need identifier keys and string values, and union sections accept
//! a string or a list of strings. No partial acceptance: any violation rejects
//! the whole record.

pub mod base;
pub mod error;
pub mod record;

pub use base::{
    json_type_name, validate_batch, ErrorCollector, SchemaValidator, ValidationConfig,
    ValidationContext,
};
pub use error::{ValidationError, ValidationErrors, Violation, ViolationKind};
pub use record::{validate_record, RecordValidator};
