//! # Logger Instances
//!
//! A [`Logger`] is derived from a [`LoggerConfig`] and never changes afterwards,
//! apart from its level threshold, which lives in a shared [`AtomicLevel`].
//! Cloning a logger is cheap: clones and child loggers share the opened sinks.
//!
//! ## Emission Path
//!
//! 1. Threshold check against the atomic level (a single load, so disabled
//!    levels cost next to nothing)
//! 2. Entry assembly: timestamp, optional caller, optional stack trace
//! 3. Encoding to one line of text
//! 4. One write per output; write failures are reported to the error outputs
//!
//! `panic` and `fatal` always run their control flow, even when the record
//! itself is filtered out by the threshold.

use crate::config::LoggerConfig;
use crate::encoder::{Encoder, Entry};
use crate::error::LogError;
use crate::field::{self, Field};
use crate::level::{AtomicLevel, Level};
use crate::sink::{self, Sink};
use chrono::Local;
use std::backtrace::Backtrace;
use std::borrow::Cow;
use std::fmt;
use std::io::{self, Write};
use std::panic::Location;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tracing_subscriber::fmt::writer::{BoxMakeWriter, MakeWriter};

static NEXT_ID: AtomicU64 = AtomicU64::new(1);

/// Exit status used by `fatal`.
pub const FATAL_EXIT_CODE: i32 = 1;

struct Core {
    id: u64,
    level: AtomicLevel,
    encoder: Encoder,
    outputs: Vec<Sink>,
    error_output: BoxMakeWriter,
    add_caller: bool,
    stacktrace_level: Option<Level>,
}

/// Immutable structured logger.
#[derive(Clone)]
pub struct Logger {
    core: Arc<Core>,
    context: Arc<[Field]>,
    name: Option<Arc<str>>,
}

impl fmt::Debug for Logger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Logger")
            .field("id", &self.core.id)
            .field("level", &self.core.level.level())
            .field("encoding", &self.core.encoder.encoding())
            .field("outputs", &self.core.outputs.iter().map(Sink::path).collect::<Vec<_>>())
            .field("context", &self.context)
            .finish()
    }
}

/// Build a standalone logger with its own level threshold.
pub fn build_logger(config: &LoggerConfig) -> Result<Logger, LogError> {
    Logger::build(config, AtomicLevel::new(config.level))
}

impl Logger {
    /// Build a logger whose threshold is the given shared level.
    pub(crate) fn build(config: &LoggerConfig, level: AtomicLevel) -> Result<Self, LogError> {
        // Open every destination up front; one bad path fails the whole build
        let outputs = sink::open_all(&config.output_paths)?;
        let error_output = sink::open_combined(&config.error_output_paths)?;

        let core = Core {
            id: NEXT_ID.fetch_add(1, Ordering::Relaxed),
            level,
            encoder: Encoder::new(config.encoding, config.keys.clone()),
            outputs,
            error_output,
            add_caller: !config.disable_caller,
            stacktrace_level: config.stacktrace_level(),
        };

        let logger = Logger {
            core: Arc::new(core),
            context: Arc::from(Vec::new()),
            name: config.name.as_deref().map(Arc::<str>::from),
        };

        // The source tag rides along as the first context field
        if config.source.is_empty() {
            Ok(logger)
        } else {
            Ok(logger.with([field::string("source", config.source.as_str())]))
        }
    }

    /// Identity of the build this logger came from. Child loggers keep their parent's id.
    pub fn id(&self) -> u64 {
        self.core.id
    }

    pub fn level(&self) -> Level {
        self.core.level.level()
    }

    pub fn enabled(&self, level: Level) -> bool {
        self.core.level.enabled(level)
    }

    /// Fields attached to every record of this logger.
    pub fn context(&self) -> &[Field] {
        &self.context
    }

    /// Child logger carrying extra permanent fields.
    pub fn with(&self, fields: impl IntoIterator<Item = Field>) -> Logger {
        let mut context = self.context.to_vec();
        context.extend(fields);
        Logger {
            core: Arc::clone(&self.core),
            context: Arc::from(context),
            name: self.name.clone(),
        }
    }

    /// Child logger with a name segment appended, dot-separated.
    pub fn named(&self, segment: &str) -> Logger {
        let name = match &self.name {
            Some(parent) if !segment.is_empty() => format!("{parent}.{segment}"),
            Some(parent) => parent.to_string(),
            None => segment.to_string(),
        };
        Logger {
            core: Arc::clone(&self.core),
            context: Arc::clone(&self.context),
            name: Some(Arc::from(name)),
        }
    }

    /// Formatted-message layer over this logger.
    pub fn sugar(&self) -> Sugar {
        Sugar {
            logger: self.clone(),
        }
    }

    #[track_caller]
    pub fn log(&self, level: Level, msg: &str, fields: &[Field]) {
        if self.enabled(level) {
            self.write(level, msg, fields, Some(Location::caller()));
        }
    }

    /// Like [`Logger::log`], for records whose call site is not a Rust caller of this crate.
    pub(crate) fn log_untracked(&self, level: Level, msg: &str, fields: &[Field]) {
        if self.enabled(level) {
            self.write(level, msg, fields, None);
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

    /// Log, then unwind the current thread with `msg` as the panic payload.
    #[track_caller]
    pub fn panic(&self, msg: &str, fields: &[Field]) -> ! {
        self.log(Level::Panic, msg, fields);
        panic!("{}", msg);
    }

    /// Log, flush, then terminate the process.
    #[track_caller]
    pub fn fatal(&self, msg: &str, fields: &[Field]) -> ! {
        self.log(Level::Fatal, msg, fields);
        let _ = self.sync();
        std::process::exit(FATAL_EXIT_CODE);
    }

    /// Flush every output. The first failure is returned after all sinks were tried.
    pub fn sync(&self) -> io::Result<()> {
        let mut first_err = None;
        for sink in &self.core.outputs {
            if let Err(e) = sink.sync() {
                first_err.get_or_insert(e);
            }
        }
        if let Err(e) = self.core.error_output.make_writer().flush() {
            first_err.get_or_insert(e);
        }
        match first_err {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }

    fn write(
        &self,
        level: Level,
        msg: &str,
        fields: &[Field],
        caller: Option<&'static Location<'static>>,
    ) {
        let core = &self.core;

        // Stack trace only at or above the configured threshold
        let stack = core
            .stacktrace_level
            .filter(|threshold| level >= *threshold)
            .map(|_| Backtrace::force_capture().to_string());

        let entry = Entry {
            level,
            time: Local::now(),
            name: self.name.as_deref(),
            caller: caller.filter(|_| core.add_caller),
            message: msg,
            stack,
        };
        let line = match core.encoder.encode(&entry, &self.context, fields) {
            Ok(line) => line,
            Err(e) => {
                self.report_internal_error(format_args!("encode error: {e}"));
                return;
            }
        };

        // Every output gets the record; a failing one does not stop the rest
        for sink in &core.outputs {
            if let Err(e) = sink.write_record(&line) {
                self.report_internal_error(format_args!("write error: {}: {}", sink.path(), e));
            }
        }
    }

    /// Timestamped line on the error outputs. Failures here are dropped.
    fn report_internal_error(&self, what: fmt::Arguments<'_>) {
        let line = format!("{} {}\n", Local::now().format("%Y-%m-%dT%H:%M:%S%.3f%z"), what);
        let _ = self.core.error_output.make_writer().write_all(line.as_bytes());
    }
}

/// printf-style convenience layer derived from a [`Logger`].
///
/// Messages are only formatted when the level passes the threshold.
#[derive(Debug, Clone)]
pub struct Sugar {
    logger: Logger,
}

impl Sugar {
    /// The structured logger underneath.
    pub fn desugar(&self) -> &Logger {
        &self.logger
    }

    #[track_caller]
    pub fn logf(&self, level: Level, args: fmt::Arguments<'_>) {
        if self.logger.enabled(level) {
            let msg = render(args);
            self.logger.write(level, &msg, &[], Some(Location::caller()));
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
        self.logger.panic(&render(args), &[])
    }

    #[track_caller]
    pub fn fatalf(&self, args: fmt::Arguments<'_>) -> ! {
        self.logger.fatal(&render(args), &[])
    }
}

fn render(args: fmt::Arguments<'_>) -> Cow<'_, str> {
    match args.as_str() {
        Some(s) => Cow::Borrowed(s),
        None => Cow::Owned(args.to_string()),
    }
}
