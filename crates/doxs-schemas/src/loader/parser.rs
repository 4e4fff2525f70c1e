//! Record parsing for YAML and JSON formats
//!
//! Copyright (c) 2025 Doxs Team
//! Licensed under the Apache-2.0 license

use crate::loader::error::{LoaderError, LoaderResult};
use serde_json::Value;
use std::path::Path;
use tracing::debug;

/// Supported record file formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    /// YAML format (.yaml, .yml)
    Yaml,
    /// JSON format (.json)
    Json,
}

impl Format {
    /// Detect format from file extension
    pub fn from_path(path: &Path) -> LoaderResult<Self> {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(extension) => match extension.to_lowercase().as_str() {
                "yaml" | "yml" => Ok(Format::Yaml),
                "json" => Ok(Format::Json),
                _ => Err(LoaderError::unsupported_format(path.to_path_buf())),
            },
            None => Err(LoaderError::unsupported_format(path.to_path_buf())),
        }
    }

    /// Get file extensions for this format
    pub fn extensions(&self) -> &'static [&'static str] {
        match self {
            Format::Yaml => &["yaml", "yml"],
            Format::Json => &["json"],
        }
    }
}

/// Turns record text into the raw mapping the validator consumes.
/// Mapping order is preserved in both formats.
#[derive(Debug, Default, Clone, Copy)]
pub struct RecordLoader;

impl RecordLoader {
    pub fn new() -> Self {
        Self
    }

    /// Parse a record file, detecting format from extension
    pub fn parse_file(&self, path: &Path) -> LoaderResult<Value> {
        let format = Format::from_path(path)?;
        let content = std::fs::read_to_string(path)
            .map_err(|e| LoaderError::io_error(path.to_path_buf(), e))?;

        debug!(path = %path.display(), ?format, "loading record");
        self.parse_content(&content, format, path)
    }

    /// Parse record content with explicit format
    pub fn parse_content(&self, content: &str, format: Format, path: &Path) -> LoaderResult<Value> {
        match format {
            Format::Yaml => self.parse_yaml(content, path),
            Format::Json => self.parse_json(content, path),
        }
    }

    /// Parse YAML content
    pub fn parse_yaml(&self, content: &str, path: &Path) -> LoaderResult<Value> {
        let yaml_value: serde_yaml::Value = serde_yaml::from_str(content)
            .map_err(|e| LoaderError::yaml_parse_error(path.to_path_buf(), e))?;

        serde_json::to_value(yaml_value)
            .map_err(|e| LoaderError::json_parse_error(path.to_path_buf(), e))
    }

    /// Parse JSON content
    pub fn parse_json(&self, content: &str, path: &Path) -> LoaderResult<Value> {
        serde_json::from_str(content)
            .map_err(|e| LoaderError::json_parse_error(path.to_path_buf(), e))
    }

    /// Parse content of unknown format: the extension's format if it has
    /// one, then JSON, then YAML
    pub fn parse_with_fallback(&self, content: &str, path: &Path) -> LoaderResult<(Value, Format)> {
        if let Ok(format) = Format::from_path(path) {
            if let Ok(value) = self.parse_content(content, format, path) {
                return Ok((value, format));
            }
        }

        if let Ok(value) = self.parse_json(content, path) {
            return Ok((value, Format::Json));
        }

        if let Ok(value) = self.parse_yaml(content, path) {
            return Ok((value, Format::Yaml));
        }

        Err(LoaderError::unsupported_format(path.to_path_buf()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::path::PathBuf;

    fn path(name: &str) -> PathBuf {
        PathBuf::from(name)
    }

    #[test]
    fn test_format_detection() {
        assert_eq!(Format::from_path(&path("a.yaml")).unwrap(), Format::Yaml);
        assert_eq!(Format::from_path(&path("a.YML")).unwrap(), Format::Yaml);
        assert_eq!(Format::from_path(&path("a.json")).unwrap(), Format::Json);
        assert!(Format::from_path(&path("a.txt")).is_err());
        assert!(Format::from_path(&path("README")).is_err());
    }

    #[test]
    fn test_yaml_preserves_mapping_order() {
        let yaml = "title: Add\nparameters:\n  b: second\n  a: first\n";
        let value = RecordLoader::new()
            .parse_content(yaml, Format::Yaml, &path("add.yaml"))
            .unwrap();
        let keys: Vec<&String> = value["parameters"].as_object().unwrap().keys().collect();
        assert_eq!(keys, vec!["b", "a"]);
    }

    #[test]
    fn test_yaml_null_and_lists() {
        let yaml = "title: x\nnotes:\nsee_also:\n  - foo\n  - bar\n";
        let value = RecordLoader::new()
            .parse_content(yaml, Format::Yaml, &path("x.yaml"))
            .unwrap();
        assert_eq!(value, json!({"title": "x", "notes": null, "see_also": ["foo", "bar"]}));
    }

    #[test]
    fn test_fallback_detection() {
        let loader = RecordLoader::new();
        let (_, format) = loader
            .parse_with_fallback(r#"{"title": "x"}"#, &path("record"))
            .unwrap();
        assert_eq!(format, Format::Json);

        let (value, format) = loader.parse_with_fallback("title: x\n", &path("record")).unwrap();
        assert_eq!(format, Format::Yaml);
        assert_eq!(value, json!({"title": "x"}));
    }

    #[test]
    fn test_parse_errors_carry_path() {
        let err = RecordLoader::new()
            .parse_content("{broken", Format::Json, &path("bad.json"))
            .unwrap_err();
        assert!(matches!(err, LoaderError::JsonParseError { .. }));
        assert_eq!(err.path(), &path("bad.json"));
    }
}
