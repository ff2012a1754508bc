//! Extraction of variable declarations from template text.
//!
//! Declarations live in template comments so the annotated template stays
//! renderable as-is:
//!
//! ```text
//! {#- @variable age: type=integer, label="Age", required=true, default=18 -#}
//! ```
//!
//! The configuration after the colon is a loose list of `key=value`
//! clauses. Clauses that do not parse are skipped, never reported.

use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;

use super::types::{Bound, VarType, VariableSchema};

// The config part cannot contain '-', which also keeps it from running past
// the closing `-#}`.
static DECLARATION_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\{#-\s*@variable\s+(\w+):\s*([^-]+)-#\}").expect("valid regex")
});

// Value alternatives are tried in order: "..", '..', [..], number, bareword.
static CLAUSE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#"(\w+)\s*=\s*(?:"([^"]*)"|'([^']*)'|\[([^\]]*)\]|(\d+(?:\.\d+)?)|(\w+))"#,
    )
    .expect("valid regex")
});

/// A value literal from a declaration clause.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigValue<'a> {
    /// Contents of a double- or single-quoted string.
    Quoted(&'a str),
    /// Raw contents between `[` and `]`.
    List(&'a str),
    /// A bare numeric literal.
    Number(&'a str),
    /// A bare identifier such as `true` or `integer`.
    Bareword(&'a str),
}

impl<'a> ConfigValue<'a> {
    #[must_use]
    pub fn as_str(&self) -> &'a str {
        match *self {
            ConfigValue::Quoted(s)
            | ConfigValue::List(s)
            | ConfigValue::Number(s)
            | ConfigValue::Bareword(s) => s,
        }
    }
}

/// Extract every variable declaration from `template`, in source order.
///
/// Never fails: text that does not match the declaration syntax is simply
/// not a declaration. Duplicate names are kept as separate entries.
#[must_use]
pub fn extract_variables(template: &str) -> Vec<VariableSchema> {
    let variables: Vec<VariableSchema> = DECLARATION_RE
        .captures_iter(template)
        .map(|caps| parse_declaration(&caps[1], &caps[2]))
        .collect();

    debug!(count = variables.len(), "extracted variable declarations");
    variables
}

/// Build a schema entry from a declaration's name and config text.
#[must_use]
pub fn parse_declaration(name: &str, config: &str) -> VariableSchema {
    let mut schema = VariableSchema::new(name);
    let mut label = None;

    for (key, value) in parse_config(config) {
        let raw = value.as_str();
        match key {
            "type" => schema.var_type = VarType::from_token(raw),
            "label" => label = Some(raw.to_string()),
            "required" => schema.required = raw.eq_ignore_ascii_case("true"),
            "options" => schema.options = split_options(raw),
            "min" => apply_bound(&mut schema.min, name, key, raw),
            "max" => apply_bound(&mut schema.max, name, key, raw),
            "default" => schema.default = Some(raw.to_string()),
            "placeholder" => schema.placeholder = Some(raw.to_string()),
            "description" => schema.description = Some(raw.to_string()),
            _ => {}
        }
    }

    if let Some(label) = label {
        schema.label = label;
    }

    schema
}

/// Split a config string into `key=value` clauses.
///
/// Text between clauses (commas, stray tokens) is ignored.
#[must_use]
pub fn parse_config(config: &str) -> Vec<(&str, ConfigValue<'_>)> {
    CLAUSE_RE
        .captures_iter(config)
        .filter_map(|caps| {
            let key = caps.get(1)?.as_str();
            let value = if let Some(m) = caps.get(2).or_else(|| caps.get(3)) {
                ConfigValue::Quoted(m.as_str())
            } else if let Some(m) = caps.get(4) {
                ConfigValue::List(m.as_str())
            } else if let Some(m) = caps.get(5) {
                ConfigValue::Number(m.as_str())
            } else {
                ConfigValue::Bareword(caps.get(6)?.as_str())
            };
            Some((key, value))
        })
        .collect()
}

/// Split option list contents on commas.
///
/// Each element is trimmed, then stripped of surrounding double and single
/// quotes. Nested quoting is not understood.
fn split_options(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|opt| opt.trim().trim_matches('"').trim_matches('\'').to_string())
        .collect()
}

fn apply_bound(slot: &mut Option<Bound>, name: &str, key: &str, raw: &str) {
    match Bound::parse(raw) {
        Some(bound) => *slot = Some(bound),
        None => debug!(variable = name, key, value = raw, "ignoring non-numeric bound"),
    }
}
