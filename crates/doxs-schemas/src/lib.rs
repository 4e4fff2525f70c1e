//! Doxs Schemas - JSON Schema artifact and record loading
//!
//! Copyright (c) 2025 Doxs Team
//! Licensed under the Apache-2.0 license
//!
//! This crate publishes the documentation record schema as a JSON Schema
//! draft 2020-12 document and loads raw records from YAML or JSON files.
//!
//! ## Features
//!
//! - **Schema Artifact**: `schemas/doxs-record.schema.json`, embedded at build time
//! - **Artifact Validation**: [`ArtifactValidator`] checks records with the `jsonschema` crate
//! - **Record Loading**: [`RecordLoader`] turns YAML or JSON text into raw mappings
//!
//! ## Quick Start
//!
//! ```rust
//! use doxs_schemas::{ArtifactValidator, Format, RecordLoader};
//! use doxs_core::SchemaValidator;
//! use std::path::Path;
//!
//! let raw = RecordLoader::new()
//!     .parse_content("title: Add\nreturns: the sum\n", Format::Yaml, Path::new("add.yaml"))
//!     .unwrap();
//!
//! let validator = ArtifactValidator::new().unwrap();
//! assert!(validator.is_valid(&raw));
//!
//! let docstring = doxs_core::compile(&raw).unwrap();
//! assert!(docstring.starts_with("Add\n"));
//! ```

pub mod artifact;
pub mod loader;

pub use artifact::{record_schema, ArtifactValidator, RECORD_SCHEMA_VERSION};
pub use loader::{Format, LoaderError, LoaderResult, RecordLoader};
