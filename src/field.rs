//! Typed key-value pairs attached to individual records.
//!
//! Constructors are plain data builders with no side effects. Values serialize
//! through `serde`: non-finite floats become the strings `"NaN"`, `"+Inf"` and
//! `"-Inf"`, durations become float seconds.

use serde::{Serialize, Serializer};
use std::time::Duration;

/// Value carried by a [`Field`].
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Int(i64),
    Uint(u64),
    Float32(f32),
    Float64(f64),
    Bool(bool),
    Str(String),
    Duration(Duration),
}

impl Serialize for FieldValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            FieldValue::Int(v) => serializer.serialize_i64(*v),
            FieldValue::Uint(v) => serializer.serialize_u64(*v),
            FieldValue::Float32(v) if v.is_finite() => serializer.serialize_f32(*v),
            FieldValue::Float32(v) => serializer.serialize_str(non_finite(f64::from(*v))),
            FieldValue::Float64(v) if v.is_finite() => serializer.serialize_f64(*v),
            FieldValue::Float64(v) => serializer.serialize_str(non_finite(*v)),
            FieldValue::Bool(v) => serializer.serialize_bool(*v),
            FieldValue::Str(v) => serializer.serialize_str(v),
            FieldValue::Duration(v) => serializer.serialize_f64(v.as_secs_f64()),
        }
    }
}

fn non_finite(v: f64) -> &'static str {
    if v.is_nan() {
        "NaN"
    } else if v > 0.0 {
        "+Inf"
    } else {
        "-Inf"
    }
}

/// A key and a typed value.
#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    pub key: String,
    pub value: FieldValue,
}

impl Field {
    pub fn new(key: impl Into<String>, value: FieldValue) -> Self {
        Self {
            key: key.into(),
            value,
        }
    }
}

pub fn int8(key: impl Into<String>, v: i8) -> Field {
    Field::new(key, FieldValue::Int(v.into()))
}

pub fn uint8(key: impl Into<String>, v: u8) -> Field {
    Field::new(key, FieldValue::Uint(v.into()))
}

pub fn int16(key: impl Into<String>, v: i16) -> Field {
    Field::new(key, FieldValue::Int(v.into()))
}

pub fn uint16(key: impl Into<String>, v: u16) -> Field {
    Field::new(key, FieldValue::Uint(v.into()))
}

pub fn int32(key: impl Into<String>, v: i32) -> Field {
    Field::new(key, FieldValue::Int(v.into()))
}

pub fn uint32(key: impl Into<String>, v: u32) -> Field {
    Field::new(key, FieldValue::Uint(v.into()))
}

pub fn int64(key: impl Into<String>, v: i64) -> Field {
    Field::new(key, FieldValue::Int(v))
}

pub fn uint64(key: impl Into<String>, v: u64) -> Field {
    Field::new(key, FieldValue::Uint(v))
}

pub fn float32(key: impl Into<String>, v: f32) -> Field {
    Field::new(key, FieldValue::Float32(v))
}

pub fn float64(key: impl Into<String>, v: f64) -> Field {
    Field::new(key, FieldValue::Float64(v))
}

pub fn string(key: impl Into<String>, v: impl Into<String>) -> Field {
    Field::new(key, FieldValue::Str(v.into()))
}

/// Rendered as float seconds.
pub fn duration(key: impl Into<String>, v: Duration) -> Field {
    Field::new(key, FieldValue::Duration(v))
}

pub fn boolean(key: impl Into<String>, v: bool) -> Field {
    Field::new(key, FieldValue::Bool(v))
}
