//! Typed values produced by coercion.

use std::collections::BTreeMap;
use std::fmt;

use chrono::{DateTime, FixedOffset, Local, NaiveDateTime};
use chrono::format::{DelayedFormat, StrftimeItems};
use serde::{Deserialize, Serialize, Serializer};

/// Raw, untyped inputs keyed by variable name (as submitted by a form or
/// read from JSON).
pub type RawInputs = BTreeMap<String, serde_json::Value>;

/// Coerced values keyed by variable name.
pub type CoercedInputs = BTreeMap<String, TypedValue>;

/// How coercion reacts to input it cannot parse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CoercionMode {
    /// Substitute a fixed sentinel (`0`, `0.0`, current time).
    #[default]
    Lenient,
    /// Reject malformed integer, number and datetime input.
    Strict,
}

impl fmt::Display for CoercionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CoercionMode::Lenient => f.write_str("lenient"),
            CoercionMode::Strict => f.write_str("strict"),
        }
    }
}

/// A timestamp, with or without a UTC offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateTimeValue {
    Naive(NaiveDateTime),
    Offset(DateTime<FixedOffset>),
}

impl DateTimeValue {
    /// Current local wall-clock time.
    #[must_use]
    pub fn now() -> Self {
        DateTimeValue::Naive(Local::now().naive_local())
    }

    /// Wall-clock date and time, ignoring any offset.
    #[must_use]
    pub fn naive_local(&self) -> NaiveDateTime {
        match self {
            DateTimeValue::Naive(dt) => *dt,
            DateTimeValue::Offset(dt) => dt.naive_local(),
        }
    }

    /// Offset from UTC in seconds, if one was supplied.
    #[must_use]
    pub fn offset_seconds(&self) -> Option<i32> {
        match self {
            DateTimeValue::Naive(_) => None,
            DateTimeValue::Offset(dt) => Some(dt.offset().local_minus_utc()),
        }
    }

    /// Format with `strftime`-style specifiers.
    ///
    /// Writing the result fails with [`fmt::Error`] if `pattern` contains an
    /// unknown specifier.
    #[must_use]
    pub fn format<'a>(&self, pattern: &'a str) -> DelayedFormat<StrftimeItems<'a>> {
        match self {
            DateTimeValue::Naive(dt) => dt.format(pattern),
            DateTimeValue::Offset(dt) => dt.format(pattern),
        }
    }
}

impl fmt::Display for DateTimeValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DateTimeValue::Naive(dt) => write!(f, "{}", dt.format("%Y-%m-%d %H:%M:%S%.f")),
            DateTimeValue::Offset(dt) => {
                write!(f, "{}", dt.format("%Y-%m-%d %H:%M:%S%.f%:z"))
            }
        }
    }
}

impl Serialize for DateTimeValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// A value converted to its variable's declared type.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum TypedValue {
    String(String),
    Integer(i64),
    Number(f64),
    Boolean(bool),
    DateTime(DateTimeValue),
    Array(Vec<serde_json::Value>),
}

impl TypedValue {
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            TypedValue::String(s) => Some(s),
            _ => None,
        }
    }
}

impl From<&str> for TypedValue {
    fn from(s: &str) -> Self {
        TypedValue::String(s.to_string())
    }
}
