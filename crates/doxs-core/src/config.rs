//! Configuration management
//!
//! Settings are loaded from, in increasing precedence:
//! - Default values
//! - A configuration file (YAML, JSON or TOML)
//! - Environment variables

use crate::error::{Error, Result};
use crate::logging::LoggingConfig;
use crate::pipeline::Pipeline;
use crate::render::DialectConfig;
use crate::schema::Schema;
use crate::validation::ValidationConfig;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Main configuration structure
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DoxsConfig {
    /// Rendering layout
    pub dialect: DialectConfig,
    /// Violation collection limits
    pub validation: ValidationConfig,
    /// Logging settings
    pub logging: LoggingConfig,
}

/// Configuration file formats, chosen by extension
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FileFormat {
    Yaml,
    Json,
    Toml,
}

impl FileFormat {
    fn from_path(path: &Path) -> Result<Self> {
        match path.extension().and_then(|s| s.to_str()) {
            Some("yaml") | Some("yml") => Ok(FileFormat::Yaml),
            Some("json") => Ok(FileFormat::Json),
            Some("toml") => Ok(FileFormat::Toml),
            other => Err(Error::configuration(format!(
                "Unsupported configuration file extension {:?} for {}",
                other.unwrap_or(""),
                path.display()
            ))),
        }
    }

    fn name(self) -> &'static str {
        match self {
            FileFormat::Yaml => "YAML",
            FileFormat::Json => "JSON",
            FileFormat::Toml => "TOML",
        }
    }
}

impl DoxsConfig {
    /// Load configuration from a file
    pub fn from_file(path: &Path) -> Result<Self> {
        let format = FileFormat::from_path(path)?;
        let content = std::fs::read_to_string(path).map_err(|source| Error::Io {
            message: format!("Failed to read {}", path.display()),
            source,
        })?;

        let parse_error = |message: String| Error::Parse {
            format: format.name(),
            message,
        };

        let config = match format {
            FileFormat::Yaml => {
                serde_yaml::from_str(&content).map_err(|e| parse_error(e.to_string()))?
            }
            FileFormat::Json => {
                serde_json::from_str(&content).map_err(|e| parse_error(e.to_string()))?
            }
            FileFormat::Toml => toml::from_str(&content).map_err(|e| parse_error(e.to_string()))?,
        };

        Ok(config)
    }

    /// Load an optional file, then apply environment overrides
    pub fn load_with_env(file: Option<&Path>) -> Result<Self> {
        let mut config = match file {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        config.apply_env_overrides()?;
        Ok(config)
    }

    /// Apply `DOXS_*` and `RUST_LOG` variables from the process environment
    pub fn apply_env_overrides(&mut self) -> Result<()> {
        self.apply_overrides_from(|key| std::env::var(key).ok())
    }

    /// Apply overrides from an arbitrary variable lookup
    pub fn apply_overrides_from<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(value) = lookup("DOXS_UNDERLINE") {
            let mut chars = value.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) => self.dialect.underline = c,
                _ => {
                    return Err(Error::configuration(format!(
                        "DOXS_UNDERLINE must be a single character, got {:?}",
                        value
                    )))
                }
            }
        }

        if let Some(value) = lookup("DOXS_INDENT_WIDTH") {
            self.dialect.indent_width = parse_width("DOXS_INDENT_WIDTH", &value)?;
        }

        if let Some(value) = lookup("DOXS_LINE_WIDTH") {
            self.dialect.line_width = match parse_width("DOXS_LINE_WIDTH", &value)? {
                0 => None,
                width => Some(width),
            };
        }

        self.logging.merge_from(&lookup);
        Ok(())
    }

    /// Save configuration to a file
    pub fn save(&self, path: &Path) -> Result<()> {
        let format = FileFormat::from_path(path)?;
        let content = match format {
            FileFormat::Yaml => serde_yaml::to_string(self).map_err(|e| e.to_string()),
            FileFormat::Json => serde_json::to_string_pretty(self).map_err(|e| e.to_string()),
            FileFormat::Toml => toml::to_string_pretty(self).map_err(|e| e.to_string()),
        }
        .map_err(|message| Error::Parse {
            format: format.name(),
            message,
        })?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|source| Error::Io {
                message: format!("Failed to create {}", parent.display()),
                source,
            })?;
        }

        std::fs::write(path, content).map_err(|source| Error::Io {
            message: format!("Failed to write {}", path.display()),
            source,
        })
    }

    /// Build a pipeline for `schema` with these settings
    pub fn pipeline<'s>(&self, schema: &'s Schema) -> Result<Pipeline<'s>> {
        Ok(Pipeline::new(schema, self.dialect.clone())?.with_validation_config(self.validation))
    }
}

fn parse_width(key: &str, value: &str) -> Result<usize> {
    value
        .trim()
        .parse()
        .map_err(|e| Error::configuration_with(format!("{} must be a number, got {:?}", key, value), e))
}
