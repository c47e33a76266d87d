//! # Logger Configuration
//!
//! Everything a [`crate::Logger`] is derived from lives in [`LoggerConfig`]. The
//! same record backs the setters of [`crate::LoggerHandle`] and can also be read
//! from a TOML file so applications can keep logging settings next to the rest
//! of their configuration.
//!
//! ## Defaults
//!
//! - **Level**: `debug`
//! - **Outputs**: `stderr` for records and for internal errors
//! - **Encoding**: `console`
//! - **Development**: off
//! - **Caller**: disabled
//!
//! ## File Format
//!
//! ```toml
//! level = "info"
//! encoding = "json"
//! output_paths = ["stdout", "/var/log/app.log"]
//! source = "gate"
//!
//! [keys]
//! time = "timestamp"
//! ```
//!
//! Missing keys take their default value.

use crate::error::LogError;
use crate::level::Level;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::Path;

/// Rendering mode for records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Encoding {
    /// Human-readable, tab-separated.
    #[default]
    Console,
    /// One JSON object per line.
    Json,
}

impl Encoding {
    /// Exactly `"json"` selects JSON; every other string selects console.
    pub fn from_name(name: &str) -> Self {
        if name == "json" {
            Encoding::Json
        } else {
            Encoding::Console
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Encoding::Console => "console",
            Encoding::Json => "json",
        }
    }
}

impl fmt::Display for Encoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Names of the fixed elements of a record. An empty name drops the element.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EncoderKeys {
    pub time: String,
    pub level: String,
    pub name: String,
    pub caller: String,
    pub message: String,
    pub stacktrace: String,
}

impl Default for EncoderKeys {
    fn default() -> Self {
        Self {
            time: "ts".to_string(),
            level: "lv".to_string(),
            name: "logger".to_string(),
            caller: "caller".to_string(),
            message: "msg".to_string(),
            stacktrace: "stacktrace".to_string(),
        }
    }
}

/// Complete description of a logger.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggerConfig {
    /// Minimum emitted severity
    pub level: Level,

    /// Development mode captures stack traces from `warn` upwards instead of `error`
    pub development: bool,

    /// When false, records carry the `file:line` of the emitting call
    pub disable_caller: bool,

    pub disable_stacktrace: bool,

    pub encoding: Encoding,

    /// `stdout`, `stderr`, or file paths
    pub output_paths: Vec<String>,

    /// Destinations for the logger's own write failures
    pub error_output_paths: Vec<String>,

    /// Attached to every record as the `source` field when non-empty
    pub source: String,

    /// Rendered under the `logger` key when set
    pub name: Option<String>,

    pub keys: EncoderKeys,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            level: Level::Debug,
            development: false,
            disable_caller: true,
            disable_stacktrace: false,
            encoding: Encoding::Console,
            output_paths: vec!["stderr".to_string()],
            error_output_paths: vec!["stderr".to_string()],
            source: String::new(),
            name: None,
            keys: EncoderKeys::default(),
        }
    }
}

impl LoggerConfig {
    /// Parse a configuration from TOML text.
    pub fn from_toml_str(content: &str) -> Result<Self, LogError> {
        Ok(toml::from_str(content)?)
    }

    /// Load a configuration from a TOML file.
    ///
    /// Read and parse errors are returned, never replaced by defaults.
    pub fn load(path: &Path) -> Result<Self, LogError> {
        let content = fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Lowest level that gets a stack trace, if any.
    pub fn stacktrace_level(&self) -> Option<Level> {
        if self.disable_stacktrace {
            None
        } else if self.development {
            Some(Level::Warn)
        } else {
            Some(Level::Error)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = LoggerConfig::default();
        assert_eq!(config.level, Level::Debug);
        assert_eq!(config.output_paths, vec!["stderr"]);
        assert_eq!(config.encoding, Encoding::Console);
        assert!(!config.development);
        assert!(config.disable_caller);
        assert!(config.source.is_empty());
        assert_eq!(config.keys.level, "lv");
        assert_eq!(config.keys.time, "ts");
    }

    #[test]
    fn test_encoding_from_name() {
        assert_eq!(Encoding::from_name("json"), Encoding::Json);
        assert_eq!(Encoding::from_name("JSON"), Encoding::Console);
        assert_eq!(Encoding::from_name("console"), Encoding::Console);
        assert_eq!(Encoding::from_name("xml"), Encoding::Console);
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config = LoggerConfig::from_toml_str(
            r#"
            level = "warning"
            encoding = "json"
            source = "gate"

            [keys]
            time = "timestamp"
            "#,
        )
        .expect("valid config");

        assert_eq!(config.level, Level::Warn);
        assert_eq!(config.encoding, Encoding::Json);
        assert_eq!(config.source, "gate");
        assert_eq!(config.output_paths, vec!["stderr"]);
        assert_eq!(config.keys.time, "timestamp");
        assert_eq!(config.keys.message, "msg");
    }

    #[test]
    fn test_invalid_toml_is_an_error() {
        let result = LoggerConfig::from_toml_str("level = [[[");
        assert!(matches!(result, Err(LogError::Parse(_))));
    }

    #[test]
    fn test_stacktrace_level() {
        let mut config = LoggerConfig::default();
        assert_eq!(config.stacktrace_level(), Some(Level::Error));
        config.development = true;
        assert_eq!(config.stacktrace_level(), Some(Level::Warn));
        config.disable_stacktrace = true;
        assert_eq!(config.stacktrace_level(), None);
    }
}
