//! Conversion of coerced inputs into template values.
//!
//! Most values go through `serde`. Datetimes become objects so templates
//! can read their fields (`{{ d.year }}`) and format them
//! (`{{ d.strftime("%d %B %Y") }}`) while `{{ d }}` still prints the
//! plain timestamp.

use std::collections::BTreeMap;
use std::fmt::{self, Write as _};
use std::sync::Arc;

use chrono::{Datelike, Timelike};
use minijinja::value::{Object, ObjectRepr, Value, from_args};
use minijinja::{Error, ErrorKind, State};

use crate::coerce::{CoercedInputs, DateTimeValue, TypedValue};

/// Build the render context for a set of coerced values.
pub(crate) fn to_context(values: &CoercedInputs) -> BTreeMap<&str, Value> {
    values.iter().map(|(name, value)| (name.as_str(), to_value(value))).collect()
}

fn to_value(value: &TypedValue) -> Value {
    match value {
        TypedValue::DateTime(dt) => Value::from_object(*dt),
        other => Value::from_serialize(other),
    }
}

impl Object for DateTimeValue {
    fn repr(self: &Arc<Self>) -> ObjectRepr {
        ObjectRepr::Plain
    }

    fn get_value(self: &Arc<Self>, key: &Value) -> Option<Value> {
        let dt = self.naive_local();
        let field = match key.as_str()? {
            "year" => i64::from(dt.year()),
            "month" => i64::from(dt.month()),
            "day" => i64::from(dt.day()),
            "hour" => i64::from(dt.hour()),
            "minute" => i64::from(dt.minute()),
            "second" => i64::from(dt.second()),
            "microsecond" => i64::from(dt.nanosecond() / 1_000),
            _ => return None,
        };
        Some(Value::from(field))
    }

    fn call_method(
        self: &Arc<Self>,
        _state: &State<'_, '_>,
        method: &str,
        args: &[Value],
    ) -> Result<Value, Error> {
        match method {
            "strftime" => {
                let (pattern,): (&str,) = from_args(args)?;
                let mut out = String::new();
                write!(out, "{}", self.format(pattern)).map_err(|_| {
                    Error::new(
                        ErrorKind::InvalidOperation,
                        format!("invalid strftime pattern: {pattern}"),
                    )
                })?;
                Ok(Value::from(out))
            }
            "isoformat" => {
                from_args::<()>(args)?;
                let pattern = if self.offset_seconds().is_some() {
                    "%Y-%m-%dT%H:%M:%S%.f%:z"
                } else {
                    "%Y-%m-%dT%H:%M:%S%.f"
                };
                Ok(Value::from(self.format(pattern).to_string()))
            }
            _ => Err(Error::from(ErrorKind::UnknownMethod)),
        }
    }

    fn render(self: &Arc<Self>, f: &mut fmt::Formatter<'_>) -> fmt::Result
    where
        Self: Sized + 'static,
    {
        fmt::Display::fmt(&**self, f)
    }
}
