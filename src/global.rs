//! # Process-Wide Facade
//!
//! Free functions backed by one lazily created [`LoggerHandle`]. The handle starts
//! with [`LoggerConfig::default`]: level `debug`, output `stderr`, console
//! encoding, development mode off.
//!
//! ## Failure Policy
//!
//! The handle itself reports misconfiguration as a [`LogError`]. At this layer a
//! failed rebuild is fatal: the error is printed to stderr and the process exits
//! with status 1. Code that wants to recover should hold its own handle, or call
//! the fallible methods on [`handle()`] directly.
//!
//! ## Usage
//!
//! ```no_run
//! use logfacade::{infof, Level};
//!
//! logfacade::set_encoding("json");
//! logfacade::set_source("gate");
//! logfacade::set_level(Level::Info);
//!
//! logfacade::info("listening", &[logfacade::uint16("port", 8080)]);
//! infof!("accepted {} connections", 3);
//! ```

use crate::config::LoggerConfig;
use crate::error::LogError;
use crate::field::Field;
use crate::handle::LoggerHandle;
use crate::level::Level;
use crate::logger::Logger;
use once_cell::sync::Lazy;
use std::fmt;
use std::io;

static GLOBAL: Lazy<LoggerHandle> =
    Lazy::new(|| LoggerHandle::new(LoggerConfig::default()).unwrap_or_else(|e| abort_on(e)));

fn abort_on(err: LogError) -> ! {
    eprintln!("logfacade: failed to build logger: {err}");
    std::process::exit(1);
}

fn or_abort(result: Result<(), LogError>) {
    if let Err(e) = result {
        abort_on(e);
    }
}

/// The handle behind the free functions.
pub fn handle() -> &'static LoggerHandle {
    &GLOBAL
}

/// Snapshot of the live global logger.
pub fn logger() -> Logger {
    GLOBAL.logger()
}

/// Replace the whole global configuration.
pub fn configure(config: LoggerConfig) {
    or_abort(GLOBAL.apply_config(config));
}

pub fn set_source(name: &str) {
    or_abort(GLOBAL.set_source(name));
}

pub fn set_level(level: Level) {
    GLOBAL.set_level(level);
}

pub fn get_level() -> Level {
    GLOBAL.level()
}

pub fn set_output(paths: Vec<String>) {
    or_abort(GLOBAL.set_output(paths));
}

pub fn set_encoding(name: &str) {
    or_abort(GLOBAL.set_encoding(name));
}

pub fn set_development(development: bool) {
    or_abort(GLOBAL.set_development(development));
}

/// Flush the live global logger.
pub fn sync() -> io::Result<()> {
    GLOBAL.sync()
}

#[track_caller]
pub fn debug(msg: &str, fields: &[Field]) {
    GLOBAL.debug(msg, fields);
}

#[track_caller]
pub fn info(msg: &str, fields: &[Field]) {
    GLOBAL.info(msg, fields);
}

#[track_caller]
pub fn warn(msg: &str, fields: &[Field]) {
    GLOBAL.warn(msg, fields);
}

#[track_caller]
pub fn error(msg: &str, fields: &[Field]) {
    GLOBAL.error(msg, fields);
}

#[track_caller]
pub fn panic(msg: &str, fields: &[Field]) -> ! {
    GLOBAL.panic(msg, fields)
}

#[track_caller]
pub fn fatal(msg: &str, fields: &[Field]) -> ! {
    GLOBAL.fatal(msg, fields)
}

#[track_caller]
pub fn debugf(args: fmt::Arguments<'_>) {
    GLOBAL.debugf(args);
}

#[track_caller]
pub fn infof(args: fmt::Arguments<'_>) {
    GLOBAL.infof(args);
}

#[track_caller]
pub fn warnf(args: fmt::Arguments<'_>) {
    GLOBAL.warnf(args);
}

#[track_caller]
pub fn errorf(args: fmt::Arguments<'_>) {
    GLOBAL.errorf(args);
}

#[track_caller]
pub fn panicf(args: fmt::Arguments<'_>) -> ! {
    GLOBAL.panicf(args)
}

#[track_caller]
pub fn fatalf(args: fmt::Arguments<'_>) -> ! {
    GLOBAL.fatalf(args)
}
