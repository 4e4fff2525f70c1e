//! Documentation record types
//!
//! A [`DocRecord`] is the unit of work handed from the validator to the
//! renderer. Records are only ever built by
//! [`RecordValidator`](crate::validation::RecordValidator), so holding one
//! means its contents already conform to the schema that accepted it.

use crate::version::SchemaVersion;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::fmt;

/// Recognized section names, in vocabulary order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SectionName {
    Title,
    Summary,
    Deprecated,
    Parameters,
    Returns,
    Yields,
    Receives,
    Raises,
    Warnings,
    SeeAlso,
    Notes,
    References,
    Examples,
    Attributes,
    Methods,
}

/// Expected shape of a section's content
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SectionShape {
    /// A single block of text
    Text,
    /// Mapping from code identifier to description
    Identifiers,
    /// A string or a list of strings
    Names,
}

impl SectionName {
    /// Every section name, in vocabulary order
    pub const ALL: [SectionName; 15] = [
        SectionName::Title,
        SectionName::Summary,
        SectionName::Deprecated,
        SectionName::Parameters,
        SectionName::Returns,
        SectionName::Yields,
        SectionName::Receives,
        SectionName::Raises,
        SectionName::Warnings,
        SectionName::SeeAlso,
        SectionName::Notes,
        SectionName::References,
        SectionName::Examples,
        SectionName::Attributes,
        SectionName::Methods,
    ];

    /// Key used for this section in raw records
    pub fn key(&self) -> &'static str {
        match self {
            SectionName::Title => "title",
            SectionName::Summary => "summary",
            SectionName::Deprecated => "deprecated",
            SectionName::Parameters => "parameters",
            SectionName::Returns => "returns",
            SectionName::Yields => "yields",
            SectionName::Receives => "receives",
            SectionName::Raises => "raises",
            SectionName::Warnings => "warnings",
            SectionName::SeeAlso => "see_also",
            SectionName::Notes => "notes",
            SectionName::References => "references",
            SectionName::Examples => "examples",
            SectionName::Attributes => "attributes",
            SectionName::Methods => "methods",
        }
    }

    /// Look up a section by its raw key
    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|name| name.key() == key)
    }

    /// The shape this section takes in the standard vocabulary
    pub fn shape(&self) -> SectionShape {
        match self {
            SectionName::Parameters
            | SectionName::Raises
            | SectionName::Warnings
            | SectionName::Attributes => SectionShape::Identifiers,
            SectionName::SeeAlso | SectionName::Methods => SectionShape::Names,
            _ => SectionShape::Text,
        }
    }

    /// NumPy-style header for this section
    pub fn header(&self) -> &'static str {
        match self {
            SectionName::Title => "Title",
            SectionName::Summary => "Summary",
            SectionName::Deprecated => "Deprecated",
            SectionName::Parameters => "Parameters",
            SectionName::Returns => "Returns",
            SectionName::Yields => "Yields",
            SectionName::Receives => "Receives",
            SectionName::Raises => "Raises",
            SectionName::Warnings => "Warns",
            SectionName::SeeAlso => "See Also",
            SectionName::Notes => "Notes",
            SectionName::References => "References",
            SectionName::Examples => "Examples",
            SectionName::Attributes => "Attributes",
            SectionName::Methods => "Methods",
        }
    }
}

impl fmt::Display for SectionName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// One `identifier : description` entry of an identifier-keyed section
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry {
    pub name: String,
    pub description: String,
}

impl Entry {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
        }
    }
}

/// Validated content of one section
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum SectionContent {
    Text(String),
    /// Entries in input order
    Entries(Vec<Entry>),
    /// Normalized string-or-list union
    Names(Vec<String>),
}

impl SectionContent {
    /// Whether the section has nothing to render
    pub fn is_empty(&self) -> bool {
        match self {
            SectionContent::Text(text) => text.trim().is_empty(),
            SectionContent::Entries(entries) => entries.is_empty(),
            SectionContent::Names(names) => names.iter().all(|n| n.trim().is_empty()),
        }
    }

    /// Convert back into the raw mapping form accepted by the validator
    pub fn to_value(&self) -> Value {
        match self {
            SectionContent::Text(text) => Value::String(text.clone()),
            SectionContent::Entries(entries) => {
                let map: Map<String, Value> = entries
                    .iter()
                    .map(|e| (e.name.clone(), Value::String(e.description.clone())))
                    .collect();
                Value::Object(map)
            }
            SectionContent::Names(names) => {
                Value::Array(names.iter().cloned().map(Value::String).collect())
            }
        }
    }
}

/// A documentation record accepted by a schema validator
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DocRecord {
    schema_version: SchemaVersion,
    sections: BTreeMap<SectionName, SectionContent>,
}

impl DocRecord {
    pub(crate) fn from_parts(
        schema_version: SchemaVersion,
        sections: BTreeMap<SectionName, SectionContent>,
    ) -> Self {
        Self {
            schema_version,
            sections,
        }
    }

    /// Version of the schema that accepted this record
    pub fn schema_version(&self) -> &SchemaVersion {
        &self.schema_version
    }

    /// The record title. Validation guarantees it is present.
    pub fn title(&self) -> &str {
        match self.sections.get(&SectionName::Title) {
            Some(SectionContent::Text(title)) => title,
            _ => "",
        }
    }

    /// Content of a section, if the record carries it
    pub fn section(&self, name: SectionName) -> Option<&SectionContent> {
        self.sections.get(&name)
    }

    /// Whether the record carries a section (possibly empty)
    pub fn has_section(&self, name: SectionName) -> bool {
        self.sections.contains_key(&name)
    }

    /// Entries of an identifier-keyed section, in input order
    pub fn entries(&self, name: SectionName) -> &[Entry] {
        match self.sections.get(&name) {
            Some(SectionContent::Entries(entries)) => entries,
            _ => &[],
        }
    }

    /// Sections in vocabulary order
    pub fn sections(&self) -> impl Iterator<Item = (SectionName, &SectionContent)> {
        self.sections.iter().map(|(name, content)| (*name, content))
    }

    /// Number of sections carried by the record
    pub fn len(&self) -> usize {
        self.sections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    /// Raw mapping form of this record. Validating it again yields an
    /// equal record.
    pub fn to_value(&self) -> Value {
        let map: Map<String, Value> = self
            .sections
            .iter()
            .map(|(name, content)| (name.key().to_string(), content.to_value()))
            .collect();
        Value::Object(map)
    }
}
