use serde_json::Value;
use thiserror::Error;
use tracing::debug;

use crate::schema::{VarType, VariableSchema};

use super::datetime::parse_iso_datetime;
use super::types::{CoercedInputs, CoercionMode, DateTimeValue, RawInputs, TypedValue};

/// Raw input that could not be converted to its declared type.
///
/// Only surfaced in [`CoercionMode::Strict`]; lenient coercion replaces the
/// value with [`CoerceError::sentinel`].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CoerceError {
    #[error("invalid integer for '{name}': {value}")]
    InvalidInteger { name: String, value: String },

    #[error("invalid number for '{name}': {value}")]
    InvalidNumber { name: String, value: String },

    #[error("invalid datetime for '{name}': {value}")]
    InvalidDatetime { name: String, value: String },
}

impl CoerceError {
    /// The fallback value lenient coercion uses in place of the bad input.
    #[must_use]
    pub fn sentinel(&self) -> TypedValue {
        match self {
            CoerceError::InvalidInteger { .. } => TypedValue::Integer(0),
            CoerceError::InvalidNumber { .. } => TypedValue::Number(0.0),
            CoerceError::InvalidDatetime { .. } => TypedValue::DateTime(DateTimeValue::now()),
        }
    }
}

/// Coerce raw inputs against a schema, never failing.
///
/// For each declared variable, in schema order:
/// - a supplied value is converted to the declared type, with unparseable
///   integers, numbers and datetimes replaced by `0`, `0.0` and the current
///   time;
/// - a missing value takes the declared default verbatim (as a string) when
///   that default is non-empty, and is otherwise left out.
///
/// Later declarations of the same name overwrite earlier ones.
#[must_use]
pub fn coerce_inputs(schema: &[VariableSchema], raw: &RawInputs) -> CoercedInputs {
    let mut out = CoercedInputs::new();

    for var in schema {
        let typed = match raw.get(&var.name) {
            Some(value) => Some(coerce_value(var, value).unwrap_or_else(|e| {
                debug!(variable = %var.name, error = %e, "falling back to sentinel");
                e.sentinel()
            })),
            None => default_value(var),
        };
        if let Some(typed) = typed {
            out.insert(var.name.clone(), typed);
        }
    }

    out
}

/// Coerce raw inputs, rejecting malformed integer, number and datetime input.
///
/// # Errors
///
/// Returns the first [`CoerceError`] met, in schema order.
pub fn coerce_inputs_strict(
    schema: &[VariableSchema],
    raw: &RawInputs,
) -> Result<CoercedInputs, CoerceError> {
    let mut out = CoercedInputs::new();

    for var in schema {
        let typed = match raw.get(&var.name) {
            Some(value) => Some(coerce_value(var, value)?),
            None => default_value(var),
        };
        if let Some(typed) = typed {
            out.insert(var.name.clone(), typed);
        }
    }

    Ok(out)
}

/// Coerce raw inputs using the given mode.
///
/// # Errors
///
/// Only [`CoercionMode::Strict`] can fail; see [`coerce_inputs_strict`].
pub fn coerce_inputs_with_mode(
    schema: &[VariableSchema],
    raw: &RawInputs,
    mode: CoercionMode,
) -> Result<CoercedInputs, CoerceError> {
    match mode {
        CoercionMode::Lenient => Ok(coerce_inputs(schema, raw)),
        CoercionMode::Strict => coerce_inputs_strict(schema, raw),
    }
}

fn default_value(var: &VariableSchema) -> Option<TypedValue> {
    var.effective_default().map(TypedValue::from)
}

/// Convert one supplied value to the variable's declared type.
///
/// # Errors
///
/// Returns a [`CoerceError`] when an `integer`, `number` or `datetime`
/// value cannot be parsed. Other types always succeed.
pub fn coerce_value(var: &VariableSchema, value: &Value) -> Result<TypedValue, CoerceError> {
    match var.var_type {
        VarType::Integer => parse_integer(value).map(TypedValue::Integer).ok_or_else(|| {
            CoerceError::InvalidInteger { name: var.name.clone(), value: value_to_string(value) }
        }),
        VarType::Number => parse_number(value).map(TypedValue::Number).ok_or_else(|| {
            CoerceError::InvalidNumber { name: var.name.clone(), value: value_to_string(value) }
        }),
        VarType::Datetime => value
            .as_str()
            .and_then(parse_iso_datetime)
            .map(TypedValue::DateTime)
            .ok_or_else(|| CoerceError::InvalidDatetime {
                name: var.name.clone(),
                value: value_to_string(value),
            }),
        VarType::Boolean => Ok(TypedValue::Boolean(is_truthy(value))),
        VarType::Array => Ok(TypedValue::Array(to_array(value))),
        VarType::String | VarType::Select | VarType::Other(_) => {
            Ok(TypedValue::String(value_to_string(value)))
        }
    }
}

fn parse_integer(value: &Value) -> Option<i64> {
    match value {
        Value::String(s) => s.trim().parse::<i64>().ok(),
        Value::Number(n) => n.as_i64().or_else(|| n.as_f64().and_then(truncate_float)),
        Value::Bool(b) => Some(i64::from(*b)),
        _ => None,
    }
}

/// Truncate toward zero, rejecting values outside the `i64` range.
#[allow(clippy::cast_possible_truncation)]
fn truncate_float(f: f64) -> Option<i64> {
    let t = f.trunc();
    // i64::MAX is not representable as f64; the range is exclusive at 2^63.
    let limit = 2f64.powi(63);
    (-limit..limit).contains(&t).then_some(t as i64)
}

fn parse_number(value: &Value) -> Option<f64> {
    match value {
        Value::String(s) => s.trim().parse::<f64>().ok(),
        Value::Number(n) => n.as_f64(),
        Value::Bool(b) => Some(f64::from(u8::from(*b))),
        _ => None,
    }
}

/// Only `true`, `"true"`, `"True"`, `1` and `"1"` are truthy.
fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Bool(b) => *b,
        Value::String(s) => matches!(s.as_str(), "true" | "True" | "1"),
        Value::Number(n) => n.as_f64() == Some(1.0),
        _ => false,
    }
}

/// Arrays pass through. Multi-line strings split on newlines (blank lines
/// dropped); other strings split on commas (empty items kept).
fn to_array(value: &Value) -> Vec<Value> {
    match value {
        Value::Array(items) => items.clone(),
        Value::String(s) if s.contains('\n') => s
            .split('\n')
            .map(str::trim)
            .filter(|item| !item.is_empty())
            .map(|item| Value::String(item.to_string()))
            .collect(),
        Value::String(s) => s
            .split(',')
            .map(|item| Value::String(item.trim().to_string()))
            .collect(),
        other => vec![Value::String(value_to_string(other))],
    }
}

/// String conversion used for `string`-like types and array wrapping.
///
/// Strings are taken as-is. Booleans and `null` print as `True`, `False`
/// and `None`, which is what form backends historically stored for them.
/// Composite values are rendered as compact JSON.
#[must_use]
pub fn value_to_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => "None".to_string(),
        Value::Bool(true) => "True".to_string(),
        Value::Bool(false) => "False".to_string(),
        Value::Number(n) => n.to_string(),
        Value::Array(_) | Value::Object(_) => value.to_string(),
    }
}
