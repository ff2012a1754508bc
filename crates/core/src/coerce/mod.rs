//! Coercion of raw user input into typed template values.
//!
//! Raw inputs usually originate from form fields and arrive as strings (or
//! loosely typed JSON). Each declared variable's `type` decides how its raw
//! value is converted before rendering.

pub mod coercer;
pub mod datetime;
pub mod types;

pub use coercer::{
    CoerceError, coerce_inputs, coerce_inputs_strict, coerce_inputs_with_mode, coerce_value,
    value_to_string,
};
pub use datetime::parse_iso_datetime;
pub use types::{CoercedInputs, CoercionMode, DateTimeValue, RawInputs, TypedValue};
