//! Error type shared by every fallible operation in the crate.
//!
//! Library code always hands errors back to the caller. Only the global facade
//! (see [`crate::global`]) decides that a failed rebuild terminates the process.

use thiserror::Error;

/// Errors produced while building loggers or loading configuration.
#[derive(Debug, Error)]
pub enum LogError {
    /// An output destination could not be opened.
    #[error("failed to open sink `{path}`: {source}")]
    OpenSink {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Reading a configuration file failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// A configuration file was not valid TOML for [`crate::LoggerConfig`].
    #[error("parse error: {0}")]
    Parse(#[from] toml::de::Error),

    /// Strict level parsing met a token it does not know.
    #[error("unrecognized log level `{0}`")]
    UnknownLevel(String),
}
