//! The fixed record schema
//!
//! A [`Schema`] is an immutable table of recognized sections, their shapes
//! and which of them are required, plus the identifier pattern used for
//! identifier-keyed sections. The standard schema is built once per process
//! and handed to the validator and renderer explicitly.

use crate::error::{Error, Result};
use crate::types::{SectionName, SectionShape};
use crate::version::SchemaVersion;
use regex::Regex;
use serde_json::{json, Map, Value};
use std::sync::OnceLock;

/// Pattern every key of an identifier-keyed section must match
pub const IDENTIFIER_PATTERN: &str = r"^[A-Za-z_][A-Za-z0-9_]*$";

/// Version of the standard schema
pub const STANDARD_SCHEMA_VERSION: SchemaVersion = SchemaVersion::new(1, 0, 0);

/// `$id` of the published JSON Schema artifact
pub const SCHEMA_ID: &str = "https://github.com/doxs/doxs/schemas/doxs-record.schema.json";

const JSON_SCHEMA_DRAFT: &str = "https://json-schema.org/draft/2020-12/schema";

static STANDARD: OnceLock<Schema> = OnceLock::new();

/// One row of the schema table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionSpec {
    pub name: SectionName,
    pub shape: SectionShape,
    pub required: bool,
    pub description: String,
}

impl SectionSpec {
    /// Row with the standard shape and description for `name`
    pub fn standard(name: SectionName) -> Self {
        Self {
            name,
            shape: name.shape(),
            required: name == SectionName::Title,
            description: standard_description(name).to_string(),
        }
    }

    pub fn required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }

    pub fn with_shape(mut self, shape: SectionShape) -> Self {
        self.shape = shape;
        self
    }
}

fn standard_description(name: SectionName) -> &'static str {
    match name {
        SectionName::Title => "One-line summary of the documented object.",
        SectionName::Summary => "Extended summary.",
        SectionName::Deprecated => "Deprecation notice; the first line names the version.",
        SectionName::Parameters => "Parameter names mapped to their descriptions.",
        SectionName::Returns => "Description of the returned value.",
        SectionName::Yields => "Description of the yielded values.",
        SectionName::Receives => "Description of the values sent to a generator.",
        SectionName::Raises => "Exception names mapped to the conditions raising them.",
        SectionName::Warnings => "Warning names mapped to the conditions emitting them.",
        SectionName::SeeAlso => "Related objects.",
        SectionName::Notes => "Additional notes.",
        SectionName::References => "Cited references.",
        SectionName::Examples => "Usage examples.",
        SectionName::Attributes => "Attribute names mapped to their descriptions.",
        SectionName::Methods => "Notable methods.",
    }
}

/// Immutable schema table
#[derive(Debug, Clone)]
pub struct Schema {
    version: SchemaVersion,
    sections: Vec<SectionSpec>,
    identifier: Regex,
}

impl Schema {
    /// The standard schema, built on first use
    pub fn standard() -> &'static Schema {
        STANDARD.get_or_init(|| Schema {
            version: STANDARD_SCHEMA_VERSION,
            sections: SectionName::ALL.iter().copied().map(SectionSpec::standard).collect(),
            identifier: Regex::new(IDENTIFIER_PATTERN).expect("identifier pattern is valid"),
        })
    }

    /// Start building an alternate schema
    pub fn builder() -> SchemaBuilder {
        SchemaBuilder::new()
    }

    pub fn version(&self) -> &SchemaVersion {
        &self.version
    }

    /// Rows in table order
    pub fn sections(&self) -> &[SectionSpec] {
        &self.sections
    }

    /// Look up a row by raw key
    pub fn section(&self, key: &str) -> Option<&SectionSpec> {
        self.sections.iter().find(|spec| spec.name.key() == key)
    }

    /// Whether `name` is part of this schema
    pub fn recognizes(&self, name: SectionName) -> bool {
        self.sections.iter().any(|spec| spec.name == name)
    }

    /// Rows that must be present in every record
    pub fn required_sections(&self) -> impl Iterator<Item = &SectionSpec> {
        self.sections.iter().filter(|spec| spec.required)
    }

    pub fn identifier_pattern(&self) -> &str {
        self.identifier.as_str()
    }

    /// Whether `key` is a valid identifier for identifier-keyed sections
    pub fn is_identifier(&self, key: &str) -> bool {
        self.identifier.is_match(key)
    }

    /// Render this table as a JSON Schema (draft 2020-12) document
    pub fn to_json_schema(&self) -> Value {
        let mut properties = Map::new();
        for spec in &self.sections {
            properties.insert(spec.name.key().to_string(), self.property_schema(spec));
        }

        let required: Vec<Value> = self
            .required_sections()
            .map(|spec| Value::String(spec.name.key().to_string()))
            .collect();

        json!({
            "$schema": JSON_SCHEMA_DRAFT,
            "$id": SCHEMA_ID,
            "title": "DocRecord",
            "description": "A doxs documentation record rendered into a NumPy-style docstring.",
            "version": self.version.to_string(),
            "type": "object",
            "properties": properties,
            "required": required,
            "additionalProperties": false
        })
    }

    fn property_schema(&self, spec: &SectionSpec) -> Value {
        let description = spec.description.as_str();
        match (spec.shape, spec.required) {
            (SectionShape::Text, true) => json!({
                "description": description,
                "type": "string",
                "pattern": "\\S"
            }),
            (SectionShape::Text, false) => json!({
                "description": description,
                "type": ["string", "null"]
            }),
            (SectionShape::Identifiers, required) => {
                let ty = if required {
                    json!("object")
                } else {
                    json!(["object", "null"])
                };
                json!({
                    "description": description,
                    "type": ty,
                    "propertyNames": { "pattern": self.identifier_pattern() },
                    "additionalProperties": { "type": "string" }
                })
            }
            (SectionShape::Names, required) => {
                let mut variants = vec![
                    json!({ "type": "string" }),
                    json!({ "type": "array", "items": { "type": "string" } }),
                ];
                if !required {
                    variants.push(json!({ "type": "null" }));
                }
                json!({
                    "description": description,
                    "oneOf": variants
                })
            }
        }
    }
}

/// Builder for alternate schemas
#[derive(Debug, Clone)]
pub struct SchemaBuilder {
    version: SchemaVersion,
    sections: Vec<SectionSpec>,
    identifier_pattern: String,
}

impl SchemaBuilder {
    /// Start from the standard table
    pub fn new() -> Self {
        let standard = Schema::standard();
        Self {
            version: standard.version.clone(),
            sections: standard.sections.clone(),
            identifier_pattern: IDENTIFIER_PATTERN.to_string(),
        }
    }

    pub fn version(mut self, version: SchemaVersion) -> Self {
        self.version = version;
        self
    }

    /// Mark a section as required or optional
    pub fn require(mut self, name: SectionName, required: bool) -> Self {
        if let Some(spec) = self.sections.iter_mut().find(|spec| spec.name == name) {
            spec.required = required;
        }
        self
    }

    /// Drop a section from the table; records using it become invalid
    pub fn without(mut self, name: SectionName) -> Self {
        self.sections.retain(|spec| spec.name != name);
        self
    }

    /// Replace or append a row
    pub fn section(mut self, spec: SectionSpec) -> Self {
        match self.sections.iter_mut().find(|s| s.name == spec.name) {
            Some(existing) => *existing = spec,
            None => self.sections.push(spec),
        }
        self
    }

    pub fn identifier_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.identifier_pattern = pattern.into();
        self
    }

    /// Build the schema. The title section must stay present, required and
    /// text-shaped, since every rendered docstring starts with it.
    pub fn build(self) -> Result<Schema> {
        match self.sections.iter().find(|spec| spec.name == SectionName::Title) {
            Some(spec) if spec.required && spec.shape == SectionShape::Text => {}
            _ => {
                return Err(Error::configuration(
                    "schema must declare 'title' as a required text section",
                ))
            }
        }

        let identifier = Regex::new(&self.identifier_pattern).map_err(|e| {
            Error::configuration_with(
                format!("invalid identifier pattern '{}'", self.identifier_pattern),
                e,
            )
        })?;

        Ok(Schema {
            version: self.version,
            sections: self.sections,
            identifier,
        })
    }
}

impl Default for SchemaBuilder {
    fn default() -> Self {
        Self::new()
    }
}
