//! # logfacade - Structured Logging Facade
//!
//! A small process-wide logging facade: one mutable configuration (level,
//! outputs, encoding, development mode, source tag) and one live structured
//! logger derived from it.
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────┐    ┌─────────────────┐    ┌─────────────────┐
//! │ global facade   │───►│  LoggerHandle   │───►│     Logger      │
//! │                 │    │                 │    │                 │
//! │ • free functions│    │ • LoggerConfig  │    │ • Encoder       │
//! │ • *f! macros    │    │ • rebuild rules │    │ • Sinks         │
//! └─────────────────┘    │ • AtomicLevel   │    │ • context fields│
//!          ▲             └─────────────────┘    └─────────────────┘
//!          │
//! ┌─────────────────┐
//! │  FacadeLayer    │  tracing events routed into the facade
//! └─────────────────┘
//! ```
//!
//! ## Key Features
//!
//! - **Swappable logger**: every configuration change builds a fresh logger and
//!   flushes the previous one
//! - **In-place level changes**: the threshold is shared, so `set_level` needs no rebuild
//! - **Two encodings**: human-readable console lines or one JSON object per line
//! - **Typed fields**: `int8` through `duration` constructors for structured data
//! - **Explicit context object**: [`LoggerHandle`] can be owned by the application
//!   instead of using the process-wide default
//!
//! ## Record Shape
//!
//! JSON records use the keys `ts`, `lv`, `logger`, `caller`, `msg` and
//! `stacktrace`, followed by the optional `source` tag and user fields.

pub mod config;
pub mod encoder;
pub mod error;
pub mod field;
pub mod global;
pub mod handle;
pub mod layer;
pub mod level;
pub mod logger;
mod macros;
pub mod sink;

pub use config::{EncoderKeys, Encoding, LoggerConfig};
pub use error::LogError;
pub use field::{
    boolean, duration, float32, float64, int16, int32, int64, int8, string, uint16, uint32,
    uint64, uint8, Field, FieldValue,
};
pub use global::{
    configure, debug, debugf, error, errorf, fatal, fatalf, get_level, handle, info, infof,
    logger, panic, panicf, set_development, set_encoding, set_level, set_output, set_source, sync,
    warn, warnf,
};
pub use handle::LoggerHandle;
pub use layer::FacadeLayer;
pub use level::{parse_level, AtomicLevel, Level};
pub use logger::{build_logger, Logger, Sugar};
