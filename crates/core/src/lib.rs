#![deny(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

//! Annotated text templates: variable schema extraction, input coercion
//! and rendering.
//!
//! ```
//! use templator_core::coerce::{RawInputs, TypedValue, coerce_inputs};
//! use templator_core::schema::extract_variables;
//!
//! let tpl = r#"{#- @variable age: type=integer, label="Age" -#}Age: {{ age }}"#;
//! let schema = extract_variables(tpl);
//! assert_eq!(schema[0].label, "Age");
//!
//! let raw: RawInputs = [("age".to_string(), "41".into())].into_iter().collect();
//! let typed = coerce_inputs(&schema, &raw);
//! assert_eq!(typed["age"], TypedValue::Integer(41));
//! ```

pub mod coerce;
pub mod config;
pub mod pipeline;
pub mod render;
pub mod schema;

pub use coerce::{CoercedInputs, CoercionMode, RawInputs, TypedValue, coerce_inputs};
pub use pipeline::{PipelineError, RenderOutput, render_template};
pub use render::{JinjaRenderer, RenderEngine, RenderError};
pub use schema::{VariableSchema, extract_variables};

#[must_use]
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
