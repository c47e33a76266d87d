//! Output destinations.
//!
//! Identifiers resolve to `tracing_subscriber` writer factories: `stdout` and
//! `stderr` are the process streams, every other identifier is a file path
//! appended to through a non-rotating `tracing_appender` file appender.

use crate::error::LogError;
use std::fmt;
use std::io::{self, Write};
use std::path::Path;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::fmt::writer::{BoxMakeWriter, MakeWriter, MakeWriterExt};

/// A single opened destination.
pub struct Sink {
    path: String,
    writer: BoxMakeWriter,
}

impl fmt::Debug for Sink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Sink").field("path", &self.path).finish()
    }
}

impl Sink {
    /// Resolve an identifier into a destination.
    pub fn open(path: &str) -> Result<Self, LogError> {
        let writer = match path {
            "stdout" => BoxMakeWriter::new(io::stdout),
            "stderr" => BoxMakeWriter::new(io::stderr),
            _ => BoxMakeWriter::new(open_file(path)?),
        };
        Ok(Self {
            path: path.to_string(),
            writer,
        })
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    /// Write one rendered record with a single `write_all`.
    pub fn write_record(&self, bytes: &[u8]) -> io::Result<()> {
        self.writer.make_writer().write_all(bytes)
    }

    pub fn sync(&self) -> io::Result<()> {
        self.writer.make_writer().flush()
    }

    fn into_writer(self) -> BoxMakeWriter {
        self.writer
    }
}

fn open_file(path: &str) -> Result<RollingFileAppender, LogError> {
    let open_err = |source: io::Error| LogError::OpenSink {
        path: path.to_string(),
        source,
    };

    let target = Path::new(path);
    let file_name = target
        .file_name()
        .ok_or_else(|| open_err(io::Error::new(io::ErrorKind::InvalidInput, "no file name")))?;
    let dir = match target.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    // Rotation::NEVER with only a prefix writes to exactly `dir/file_name`
    RollingFileAppender::builder()
        .rotation(Rotation::NEVER)
        .filename_prefix(file_name.to_string_lossy().into_owned())
        .build(dir)
        .map_err(|e| open_err(io::Error::other(e)))
}

/// Open every identifier, failing on the first one that cannot be opened.
pub fn open_all(paths: &[String]) -> Result<Vec<Sink>, LogError> {
    paths.iter().map(|p| Sink::open(p)).collect()
}

/// Open every identifier and fan them into one writer. No identifiers discards.
pub fn open_combined(paths: &[String]) -> Result<BoxMakeWriter, LogError> {
    let mut combined: Option<BoxMakeWriter> = None;
    for sink in open_all(paths)? {
        let next = sink.into_writer();
        combined = Some(match combined {
            Some(acc) => BoxMakeWriter::new(acc.and(next)),
            None => next,
        });
    }
    Ok(combined.unwrap_or_else(|| BoxMakeWriter::new(io::sink)))
}
