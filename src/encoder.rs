//! # Record Encoding
//!
//! Turns one entry plus its fields into a single line of text.
//!
//! ## JSON
//!
//! ```text
//! {"lv":"info","ts":"2024-05-01T10:00:00.000+0200","msg":"started","source":"gate","k":"v"}
//! ```
//!
//! Element order is level, time, logger, caller, message, context fields, call
//! fields, stack trace. Context fields (the source tag and anything added with
//! [`crate::Logger::with`]) come before the fields of the individual call.
//!
//! ## Console
//!
//! ```text
//! 2024-05-01T10:00:00.000+0200	info	started	{"source":"gate","k":"v"}
//! ```
//!
//! Tab-separated fixed elements, then the fields as a JSON object, then the stack
//! trace on the following lines when one was captured.

use crate::config::{EncoderKeys, Encoding};
use crate::field::Field;
use crate::level::Level;
use chrono::{DateTime, Local};
use serde::ser::{Serialize, SerializeMap, Serializer};
use std::panic::Location;

const TIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.3f%z";

/// Fixed elements of one record.
#[derive(Debug)]
pub struct Entry<'a> {
    pub level: Level,
    pub time: DateTime<Local>,
    pub name: Option<&'a str>,
    pub caller: Option<&'static Location<'static>>,
    pub message: &'a str,
    pub stack: Option<String>,
}

/// Renders entries in one [`Encoding`] with one set of keys.
#[derive(Debug, Clone)]
pub struct Encoder {
    encoding: Encoding,
    keys: EncoderKeys,
}

impl Encoder {
    pub fn new(encoding: Encoding, keys: EncoderKeys) -> Self {
        Self { encoding, keys }
    }

    pub fn encoding(&self) -> Encoding {
        self.encoding
    }

    /// Render a full line, including the trailing newline.
    pub fn encode(
        &self,
        entry: &Entry<'_>,
        context: &[Field],
        fields: &[Field],
    ) -> serde_json::Result<Vec<u8>> {
        match self.encoding {
            Encoding::Json => self.encode_json(entry, context, fields),
            Encoding::Console => self.encode_console(entry, context, fields),
        }
    }

    fn encode_json(
        &self,
        entry: &Entry<'_>,
        context: &[Field],
        fields: &[Field],
    ) -> serde_json::Result<Vec<u8>> {
        let record = JsonRecord {
            keys: &self.keys,
            entry,
            fields: Fields(context, fields),
        };
        let mut line = serde_json::to_vec(&record)?;
        line.push(b'\n');
        Ok(line)
    }

    fn encode_console(
        &self,
        entry: &Entry<'_>,
        context: &[Field],
        fields: &[Field],
    ) -> serde_json::Result<Vec<u8>> {
        let keys = &self.keys;
        let mut elements: Vec<String> = Vec::with_capacity(6);

        if !keys.time.is_empty() {
            elements.push(entry.time.format(TIME_FORMAT).to_string());
        }
        if !keys.level.is_empty() {
            elements.push(entry.level.as_str().to_string());
        }
        if let (Some(name), false) = (entry.name, keys.name.is_empty()) {
            elements.push(name.to_string());
        }
        if let (Some(caller), false) = (entry.caller, keys.caller.is_empty()) {
            elements.push(short_caller(caller));
        }
        if !keys.message.is_empty() {
            elements.push(entry.message.to_string());
        }
        if !context.is_empty() || !fields.is_empty() {
            elements.push(serde_json::to_string(&Fields(context, fields))?);
        }

        let mut line = elements.join("\t");
        if let (Some(stack), false) = (&entry.stack, keys.stacktrace.is_empty()) {
            line.push('\n');
            line.push_str(stack.trim_end());
        }
        line.push('\n');
        Ok(line.into_bytes())
    }
}

/// `dir/file.rs:line` form of a call site.
pub fn short_caller(location: &Location<'_>) -> String {
    let file = location.file();
    let mut parts = file.rsplit(['/', '\\']);
    let short = match (parts.next(), parts.next()) {
        (Some(name), Some(dir)) => format!("{dir}/{name}"),
        (Some(name), None) => name.to_string(),
        _ => file.to_string(),
    };
    format!("{}:{}", short, location.line())
}

/// Context fields followed by call fields, in order.
struct Fields<'a>(&'a [Field], &'a [Field]);

impl Fields<'_> {
    fn serialize_into<M: SerializeMap>(&self, map: &mut M) -> Result<(), M::Error> {
        for field in self.0.iter().chain(self.1) {
            map.serialize_entry(&field.key, &field.value)?;
        }
        Ok(())
    }
}

impl Serialize for Fields<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(None)?;
        self.serialize_into(&mut map)?;
        map.end()
    }
}

struct JsonRecord<'a> {
    keys: &'a EncoderKeys,
    entry: &'a Entry<'a>,
    fields: Fields<'a>,
}

impl Serialize for JsonRecord<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let keys = self.keys;
        let entry = self.entry;
        let mut map = serializer.serialize_map(None)?;

        // Fixed elements; an empty key leaves the element out
        if !keys.level.is_empty() {
            map.serialize_entry(&keys.level, &entry.level)?;
        }
        if !keys.time.is_empty() {
            map.serialize_entry(&keys.time, &entry.time.format(TIME_FORMAT).to_string())?;
        }
        if let (Some(name), false) = (entry.name, keys.name.is_empty()) {
            map.serialize_entry(&keys.name, name)?;
        }
        if let (Some(caller), false) = (entry.caller, keys.caller.is_empty()) {
            map.serialize_entry(&keys.caller, &short_caller(caller))?;
        }
        if !keys.message.is_empty() {
            map.serialize_entry(&keys.message, entry.message)?;
        }

        // User fields are written as given, empty keys included
        self.fields.serialize_into(&mut map)?;

        if let (Some(stack), false) = (&entry.stack, keys.stacktrace.is_empty()) {
            map.serialize_entry(&keys.stacktrace, stack)?;
        }
        map.end()
    }
}
