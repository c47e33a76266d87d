//! # Logger Handle
//!
//! [`LoggerHandle`] owns the current [`LoggerConfig`] and the single live
//! [`Logger`] derived from it. Applications create one at their composition root
//! and pass it by reference to whatever needs to log; the crate-level free
//! functions in [`crate::global`] are backed by one such handle.
//!
//! ## Rebuild Rules
//!
//! - Every setter except [`LoggerHandle::set_level`] builds a fresh logger from
//!   the edited configuration before returning.
//! - A failed build leaves the previous logger and configuration in place and
//!   returns the error.
//! - A successful build replaces the live logger, then flushes the old one
//!   (errors ignored).
//! - [`LoggerHandle::set_level`] changes the threshold of the live logger in
//!   place; every logger a handle builds shares the same [`AtomicLevel`].
//!
//! ## Thread Safety
//!
//! State sits behind an `RwLock`. Emission takes a snapshot of the live logger and
//! releases the lock before writing.

use crate::config::{Encoding, LoggerConfig};
use crate::error::LogError;
use crate::field::Field;
use crate::level::{AtomicLevel, Level};
use crate::logger::{Logger, Sugar};
use std::fmt;
use std::io;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

struct State {
    config: LoggerConfig,
    logger: Logger,
    sugar: Sugar,
}

/// Explicit owner of a logging configuration and its live logger.
pub struct LoggerHandle {
    level: AtomicLevel,
    state: RwLock<State>,
}

impl fmt::Debug for LoggerHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.read();
        f.debug_struct("LoggerHandle")
            .field("config", &state.config)
            .field("logger", &state.logger)
            .finish()
    }
}

impl LoggerHandle {
    /// Build the first logger from `config`.
    pub fn new(config: LoggerConfig) -> Result<Self, LogError> {
        // Every logger this handle builds shares this threshold
        let level = AtomicLevel::new(config.level);
        let logger = Logger::build(&config, level.clone())?;
        let sugar = logger.sugar();
        Ok(Self {
            level,
            state: RwLock::new(State {
                config,
                logger,
                sugar,
            }),
        })
    }

    /// Replace the whole configuration.
    pub fn apply_config(&self, config: LoggerConfig) -> Result<(), LogError> {
        self.update(|current| {
            *current = config;
            true
        })
    }

    /// Tag every subsequent record with `source`. An empty name removes the tag.
    pub fn set_source(&self, source: &str) -> Result<(), LogError> {
        self.update(|config| {
            config.source = source.to_string();
            true
        })
    }

    /// Change the minimum emitted severity without rebuilding.
    pub fn set_level(&self, level: Level) {
        // Hold the write lock so the atomic and the stored config cannot diverge
        let mut state = self.write();
        self.level.set_level(level);
        state.config.level = level;
    }

    pub fn level(&self) -> Level {
        self.level.level()
    }

    /// Replace the list of output destinations.
    pub fn set_output(&self, paths: Vec<String>) -> Result<(), LogError> {
        self.update(|config| {
            config.output_paths = paths;
            true
        })
    }

    /// Switch encoding by name. `"json"` selects JSON, anything else console.
    ///
    /// Passing the name of the current encoding is a no-op and keeps the live logger.
    pub fn set_encoding(&self, name: &str) -> Result<(), LogError> {
        self.update(|config| {
            if config.encoding.as_str() == name {
                return false;
            }
            config.encoding = Encoding::from_name(name);
            true
        })
    }

    pub fn set_development(&self, development: bool) -> Result<(), LogError> {
        self.update(|config| {
            config.development = development;
            true
        })
    }

    /// Snapshot of the current configuration.
    pub fn config(&self) -> LoggerConfig {
        self.read().config.clone()
    }

    /// Snapshot of the live logger.
    pub fn logger(&self) -> Logger {
        self.read().logger.clone()
    }

    /// Formatted-message layer of the live logger.
    pub fn sugar(&self) -> Sugar {
        self.read().sugar.clone()
    }

    pub fn enabled(&self, level: Level) -> bool {
        self.level.enabled(level)
    }

    #[track_caller]
    pub fn log(&self, level: Level, msg: &str, fields: &[Field]) {
        if self.enabled(level) {
            self.logger().log(level, msg, fields);
        }
    }

    #[track_caller]
    pub fn debug(&self, msg: &str, fields: &[Field]) {
        self.log(Level::Debug, msg, fields);
    }

    #[track_caller]
    pub fn info(&self, msg: &str, fields: &[Field]) {
        self.log(Level::Info, msg, fields);
    }

    #[track_caller]
    pub fn warn(&self, msg: &str, fields: &[Field]) {
        self.log(Level::Warn, msg, fields);
    }

    #[track_caller]
    pub fn error(&self, msg: &str, fields: &[Field]) {
        self.log(Level::Error, msg, fields);
    }

    #[track_caller]
    pub fn panic(&self, msg: &str, fields: &[Field]) -> ! {
        self.logger().panic(msg, fields)
    }

    #[track_caller]
    pub fn fatal(&self, msg: &str, fields: &[Field]) -> ! {
        self.logger().fatal(msg, fields)
    }

    #[track_caller]
    pub fn logf(&self, level: Level, args: fmt::Arguments<'_>) {
        if self.enabled(level) {
            self.sugar().logf(level, args);
        }
    }

    #[track_caller]
    pub fn debugf(&self, args: fmt::Arguments<'_>) {
        self.logf(Level::Debug, args);
    }

    #[track_caller]
    pub fn infof(&self, args: fmt::Arguments<'_>) {
        self.logf(Level::Info, args);
    }

    #[track_caller]
    pub fn warnf(&self, args: fmt::Arguments<'_>) {
        self.logf(Level::Warn, args);
    }

    #[track_caller]
    pub fn errorf(&self, args: fmt::Arguments<'_>) {
        self.logf(Level::Error, args);
    }

    #[track_caller]
    pub fn panicf(&self, args: fmt::Arguments<'_>) -> ! {
        self.sugar().panicf(args)
    }

    #[track_caller]
    pub fn fatalf(&self, args: fmt::Arguments<'_>) -> ! {
        self.sugar().fatalf(args)
    }

    /// Flush the live logger.
    pub fn sync(&self) -> io::Result<()> {
        self.logger().sync()
    }

    /// Edit a copy of the configuration and rebuild when `edit` reports a change.
    fn update(&self, edit: impl FnOnce(&mut LoggerConfig) -> bool) -> Result<(), LogError> {
        let mut state = self.write();
        let mut config = state.config.clone();
        if !edit(&mut config) {
            return Ok(());
        }

        // Build before touching anything; on error the live state is untouched
        let logger = Logger::build(&config, self.level.clone())?;

        // Swap in the new logger and config under the same lock
        self.level.set_level(config.level);
        let previous = std::mem::replace(&mut state.logger, logger);
        state.sugar = state.logger.sugar();
        state.config = config;
        let id = state.logger.id();
        let encoding = state.config.encoding;
        drop(state);

        // Flush the replaced logger outside the lock; errors only go to diagnostics
        if let Err(e) = previous.sync() {
            tracing::debug!(error = %e, previous_id = previous.id(), "flushing replaced logger failed");
        }
        tracing::debug!(logger_id = id, %encoding, "logger rebuilt");
        Ok(())
    }

    fn read(&self) -> RwLockReadGuard<'_, State> {
        self.state.read().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn write(&self) -> RwLockWriteGuard<'_, State> {
        self.state.write().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}
