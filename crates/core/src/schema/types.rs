//! Variable schema types.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Declared semantic type of a template variable.
///
/// Unknown type tokens are kept verbatim in [`VarType::Other`] so the schema
/// round-trips what the author wrote; they coerce like [`VarType::String`].
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum VarType {
    #[default]
    String,
    Integer,
    Number,
    Boolean,
    Datetime,
    Array,
    /// Enumerated choice over the variable's `options`.
    Select,
    Other(String),
}

impl VarType {
    /// Parse a type token as written in a declaration.
    #[must_use]
    pub fn from_token(token: &str) -> Self {
        match token {
            "string" => VarType::String,
            "integer" => VarType::Integer,
            "number" => VarType::Number,
            "boolean" => VarType::Boolean,
            "datetime" => VarType::Datetime,
            "array" => VarType::Array,
            "select" => VarType::Select,
            other => VarType::Other(other.to_string()),
        }
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            VarType::String => "string",
            VarType::Integer => "integer",
            VarType::Number => "number",
            VarType::Boolean => "boolean",
            VarType::Datetime => "datetime",
            VarType::Array => "array",
            VarType::Select => "select",
            VarType::Other(s) => s,
        }
    }
}

impl From<String> for VarType {
    fn from(s: String) -> Self {
        VarType::from_token(&s)
    }
}

impl From<VarType> for String {
    fn from(t: VarType) -> Self {
        t.as_str().to_string()
    }
}

impl fmt::Display for VarType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A numeric bound (`min`/`max`) as written in the declaration.
///
/// Bounds are advisory: coercion never enforces them.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Bound {
    Integer(i64),
    Float(f64),
}

impl Bound {
    /// Parse a bound literal: all-digit literals are integers, anything
    /// else is tried as a float.
    #[must_use]
    pub fn parse(literal: &str) -> Option<Self> {
        if !literal.is_empty() && literal.bytes().all(|b| b.is_ascii_digit()) {
            // Digit strings too large for i64 still make sense as floats.
            if let Ok(n) = literal.parse::<i64>() {
                return Some(Bound::Integer(n));
            }
        }
        literal.parse::<f64>().ok().map(Bound::Float)
    }
}

impl fmt::Display for Bound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Bound::Integer(n) => write!(f, "{n}"),
            Bound::Float(x) => write!(f, "{x}"),
        }
    }
}

/// Schema for a single declared variable.
///
/// All fields are always present; absent metadata is `None` (serialized as
/// `null`) rather than omitted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VariableSchema {
    pub name: String,

    #[serde(rename = "type")]
    pub var_type: VarType,

    /// Display label. Falls back to `name` when the declaration has none.
    pub label: String,

    pub required: bool,

    /// Choices for enumerated variables, in declaration order.
    pub options: Vec<String>,

    pub min: Option<Bound>,

    pub max: Option<Bound>,

    /// Raw default, applied verbatim when no input is supplied.
    pub default: Option<String>,

    pub placeholder: Option<String>,

    pub description: Option<String>,
}

impl VariableSchema {
    /// A schema entry with every field at its default.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            label: name.clone(),
            name,
            var_type: VarType::default(),
            required: false,
            options: Vec::new(),
            min: None,
            max: None,
            default: None,
            placeholder: None,
            description: None,
        }
    }

    /// The default value, if present and non-empty.
    #[must_use]
    pub fn effective_default(&self) -> Option<&str> {
        self.default.as_deref().filter(|d| !d.is_empty())
    }
}
