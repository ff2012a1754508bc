//! Variable schema extracted from annotated templates.
//!
//! A template declares its variables in comments of the form
//! `{#- @variable <name>: key=value, ... -#}`. Recognized keys are `type`,
//! `label`, `required`, `options`, `min`, `max`, `default`, `placeholder`
//! and `description`.
//!
//! Extraction is a pure function of the template text and is recomputed on
//! every call; callers that want caching keep it themselves.

pub mod parser;
pub mod types;

pub use parser::{ConfigValue, extract_variables, parse_config, parse_declaration};
pub use types::{Bound, VarType, VariableSchema};
