//! Logging setup for applications embedding doxs
//!
//! The library itself only emits `tracing` events; nothing is printed unless
//! the host installs a subscriber, for example with [`init_logging`].

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::io::IsTerminal;
use tracing_subscriber::filter::Directive;
use tracing_subscriber::EnvFilter;

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level filter
    pub level: String,
    /// Output format: compact, full, json
    pub format: LogFormat,
    /// Colour output when stderr is a terminal
    pub ansi: bool,
    /// Include thread IDs
    pub thread_ids: bool,
    /// Include file and line numbers
    pub source_location: bool,
    /// Per-module level overrides
    pub module_filter: Option<BTreeMap<String, String>>,
}

/// Log output format
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Compact format for production
    Compact,
    /// Full format with all details
    Full,
    /// JSON structured format
    Json,
}

impl LogFormat {
    pub fn parse(name: &str) -> Option<Self> {
        match name.to_lowercase().as_str() {
            "compact" => Some(LogFormat::Compact),
            "full" => Some(LogFormat::Full),
            "json" => Some(LogFormat::Json),
            _ => None,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
            format: LogFormat::Compact,
            ansi: true,
            thread_ids: false,
            source_location: false,
            module_filter: None,
        }
    }
}

impl LoggingConfig {
    /// Apply `RUST_LOG` and `DOXS_LOG_FORMAT` taken from `lookup`
    pub fn merge_from<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(level) = lookup("RUST_LOG") {
            self.level = level;
        }

        if let Some(format) = lookup("DOXS_LOG_FORMAT") {
            match LogFormat::parse(&format) {
                Some(format) => self.format = format,
                None => tracing::warn!("Invalid log format: {}, using {:?}", format, self.format),
            }
        }
    }
}

/// Install a global `tracing` subscriber
pub fn init_logging(config: &LoggingConfig) -> Result<()> {
    let env_filter = create_env_filter(config)?;
    let ansi = config.ansi && std::io::stderr().is_terminal();

    let installed = match config.format {
        LogFormat::Compact => tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .with_writer(std::io::stderr)
            .with_target(true)
            .with_ansi(ansi)
            .with_thread_ids(config.thread_ids)
            .with_file(config.source_location)
            .with_line_number(config.source_location)
            .compact()
            .try_init(),
        LogFormat::Json => tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .with_writer(std::io::stderr)
            .with_target(true)
            .with_ansi(false)
            .with_thread_ids(config.thread_ids)
            .with_file(config.source_location)
            .with_line_number(config.source_location)
            .json()
            .try_init(),
        LogFormat::Full => tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .with_writer(std::io::stderr)
            .with_target(true)
            .with_ansi(ansi)
            .with_thread_ids(config.thread_ids)
            .with_file(config.source_location)
            .with_line_number(config.source_location)
            .try_init(),
    };

    installed.map_err(|e| Error::Configuration {
        message: format!("Failed to initialize logging: {}", e),
        source: Some(anyhow::anyhow!(e.to_string())),
    })?;

    tracing::debug!(config = ?config, "Logging system initialized");
    Ok(())
}

/// Build the filter from the configured level plus module overrides
fn create_env_filter(config: &LoggingConfig) -> Result<EnvFilter> {
    let mut filter = EnvFilter::try_new(&config.level)
        .map_err(|e| Error::configuration_with(format!("Invalid log level '{}'", config.level), e))?;

    if let Some(module_filters) = &config.module_filter {
        for (module, level) in module_filters {
            let directive = format!("{}={}", module, level)
                .parse::<Directive>()
                .map_err(|e| Error::configuration_with("Invalid filter directive", e))?;
            filter = filter.add_directive(directive);
        }
    }

    Ok(filter)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_env_overrides() {
        let mut config = LoggingConfig::default();
        config.merge_from(|key| match key {
            "RUST_LOG" => Some("doxs_core=debug".to_string()),
            "DOXS_LOG_FORMAT" => Some("JSON".to_string()),
            _ => None,
        });
        assert_eq!(config.level, "doxs_core=debug");
        assert_eq!(config.format, LogFormat::Json);
    }

    #[test]
    fn test_unknown_format_is_ignored() {
        let mut config = LoggingConfig::default();
        config.merge_from(|key| (key == "DOXS_LOG_FORMAT").then(|| "fancy".to_string()));
        assert_eq!(config.format, LogFormat::Compact);
    }

    #[test]
    fn test_filter_with_module_overrides() {
        let mut config = LoggingConfig::default();
        config.module_filter = Some(BTreeMap::from([(
            "doxs_core::render".to_string(),
            "trace".to_string(),
        )]));
        assert!(create_env_filter(&config).is_ok());
    }

    #[test]
    fn test_format_names_deserialize() {
        let config: LoggingConfig = serde_json::from_str(r#"{"format": "json"}"#).unwrap();
        assert_eq!(config.format, LogFormat::Json);
        assert_eq!(config.level, "warn");
    }

    #[test]
    fn test_invalid_level_is_a_configuration_error() {
        let config = LoggingConfig {
            level: "doxs_core=loudest".to_string(),
            ..LoggingConfig::default()
        };
        assert!(matches!(
            init_logging(&config),
            Err(Error::Configuration { .. })
        ));
    }

    #[test]
    fn test_second_install_is_a_configuration_error() {
        let config = LoggingConfig {
            ansi: false,
            ..LoggingConfig::default()
        };

        // Another test binary may already own the global subscriber
        match init_logging(&config) {
            Ok(()) | Err(Error::Configuration { .. }) => {}
            Err(other) => panic!("unexpected error: {}", other),
        }

        let err = init_logging(&config).unwrap_err();
        assert!(matches!(err, Error::Configuration { .. }));
        assert!(err.to_string().contains("logging"));
    }
}
