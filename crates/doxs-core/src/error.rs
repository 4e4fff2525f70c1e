//! Error types for the doxs core library
//!
//! Every failure the pipeline can report is a variant of [`Error`]. Schema
//! violations carry the full [`ValidationErrors`] collection so callers can
//! show every offending key at once.

use crate::validation::ValidationErrors;
use thiserror::Error;

/// Main error type for doxs operations
#[derive(Error, Debug)]
pub enum Error {
    /// The raw mapping does not conform to the record schema
    #[error("Schema validation failed: {0}")]
    SchemaViolation(#[from] ValidationErrors),

    /// A record reached the renderer without passing a compatible validator.
    /// This is a programming error, not a user-facing condition.
    #[error("Render precondition violated: {message}")]
    RenderPrecondition { message: String },

    /// Invalid dialect options, schema tables or configuration files
    #[error("Configuration error: {message}")]
    Configuration {
        message: String,
        #[source]
        source: Option<anyhow::Error>,
    },

    /// Configuration file could not be parsed
    #[error("Parse error in {format}: {message}")]
    Parse { format: &'static str, message: String },

    /// IO errors
    #[error("IO error: {message}")]
    Io {
        message: String,
        #[source]
        source: std::io::Error,
    },
}

/// Convenience type alias for Results using our Error type
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Create a configuration error without an underlying cause
    pub fn configuration(message: impl Into<String>) -> Self {
        Error::Configuration {
            message: message.into(),
            source: None,
        }
    }

    /// Create a configuration error wrapping an underlying cause
    pub fn configuration_with<E>(message: impl Into<String>, source: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Error::Configuration {
            message: message.into(),
            source: Some(anyhow::Error::new(source)),
        }
    }

    /// Create a render precondition error
    pub fn render_precondition(message: impl Into<String>) -> Self {
        Error::RenderPrecondition {
            message: message.into(),
        }
    }

    /// Returns the validation errors if this is a schema violation
    pub fn violations(&self) -> Option<&ValidationErrors> {
        match self {
            Error::SchemaViolation(errors) => Some(errors),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::{ValidationError, ViolationKind};

    #[test]
    fn test_schema_violation_display() {
        let err: Error = ValidationErrors::from(ValidationError::new(
            ViolationKind::UnknownSection,
            "$.bogus",
            "bogus",
            "Unknown section 'bogus'",
        ))
        .into();

        assert!(err.to_string().contains("bogus"));
        assert_eq!(err.violations().map(|v| v.len()), Some(1));
    }

    #[test]
    fn test_configuration_error_keeps_source() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let err = Error::configuration_with("could not read dialect", io);

        assert!(err.to_string().contains("could not read dialect"));
        assert!(std::error::Error::source(&err).is_some());
        assert!(err.violations().is_none());
    }
}
