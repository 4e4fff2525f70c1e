//! Doxs Core - Schema validation and NumPy-style rendering of documentation records
//!
//! A documentation record is a mapping from section names (`title`,
//! `parameters`, `returns`, ...) to their content. This crate checks such
//! mappings against a fixed schema and renders the accepted records as
//! NumPy-style docstrings.
//!
//! # Main Components
//!
//! - **Schema**: The immutable section table and its JSON Schema projection
//! - **Validation**: [`RecordValidator`] turns raw mappings into [`DocRecord`]s
//! - **Rendering**: [`Renderer`] lays records out per a [`DialectConfig`]
//! - **Pipeline**: Validate then render in one call
//!
//! # Example
//!
//! ```
//! use serde_json::json;
//!
//! let docstring = doxs_core::compile(&json!({
//!     "title": "Add",
//!     "summary": "Adds two numbers.",
//!     "parameters": {"a": "first operand", "b": "second operand"},
//!     "returns": "the sum"
//! }))
//! .unwrap();
//!
//! assert!(docstring.contains("Parameters\n----------\na : first operand\n"));
//! ```

pub mod config;
pub mod error;
pub mod logging;
pub mod pipeline;
pub mod render;
pub mod schema;
pub mod types;
pub mod validation;
pub mod version;

// Re-export main types for convenience
pub use config::DoxsConfig;
pub use error::{Error, Result};
pub use pipeline::{compile, Pipeline};
pub use render::{merge_docstring, DialectConfig, Renderer};
pub use schema::{Schema, SchemaBuilder, SectionSpec, IDENTIFIER_PATTERN, STANDARD_SCHEMA_VERSION};
pub use types::{DocRecord, Entry, SectionContent, SectionName, SectionShape};
pub use validation::{
    validate_record, RecordValidator, SchemaValidator, ValidationConfig, ValidationError,
    ValidationErrors, ViolationKind,
};
pub use version::SchemaVersion;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
