//! Configuration for logging

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ObservabilityError;

/// Shape of each stderr log line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// One line per event, span context inline
    #[default]
    Compact,
    /// tracing-subscriber's default multi-field format
    Full,
}

impl FromStr for LogFormat {
    type Err = ObservabilityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "compact" => Ok(LogFormat::Compact),
            "full" => Ok(LogFormat::Full),
            other => Err(ObservabilityError::Config(format!(
                "unknown log format '{other}' (expected compact or full)"
            ))),
        }
    }
}

/// Observability configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObservabilityConfig {
    /// Service name attached to the startup event
    pub service_name: String,

    /// Log level filter (e.g., "info", "wod_llm=debug").
    /// Falls back to `RUST_LOG`, then "warn"
    pub log_level: Option<String>,

    /// Emit log lines at all
    #[serde(default = "default_console")]
    pub enable_console: bool,

    #[serde(default)]
    pub format: LogFormat,
}

fn default_console() -> bool {
    true
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            service_name: "wod".to_string(),
            log_level: None,
            enable_console: true,
            format: LogFormat::default(),
        }
    }
}

impl ObservabilityConfig {
    /// Create a new configuration with service name
    pub fn new(service_name: impl Into<String>) -> Self {
        Self {
            service_name: service_name.into(),
            ..Default::default()
        }
    }

    /// Enable or disable console output
    pub fn with_console(mut self, enable: bool) -> Self {
        self.enable_console = enable;
        self
    }

    /// Set log level
    pub fn with_log_level(mut self, level: impl Into<String>) -> Self {
        self.log_level = Some(level.into());
        self
    }

    pub fn with_format(mut self, format: LogFormat) -> Self {
        self.format = format;
        self
    }

    /// Build from environment variables
    ///
    /// Reads:
    /// - `WOD_LOG` or `RUST_LOG` → log_level
    /// - `WOD_LOG_FORMAT` → format
    pub fn from_env(service_name: impl Into<String>) -> Result<Self, ObservabilityError> {
        Self::from_lookup(service_name, |key| std::env::var(key).ok())
    }

    /// Same as [`Self::from_env`], reading values through `lookup`.
    pub fn from_lookup<F>(service_name: impl Into<String>, lookup: F) -> Result<Self, ObservabilityError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let log_level = lookup("WOD_LOG")
            .or_else(|| lookup("RUST_LOG"))
            .filter(|level| !level.trim().is_empty());

        let format = match lookup("WOD_LOG_FORMAT") {
            Some(value) => value.parse()?,
            None => LogFormat::default(),
        };

        Ok(Self {
            service_name: service_name.into(),
            log_level,
            enable_console: true,
            format,
        })
    }
}
