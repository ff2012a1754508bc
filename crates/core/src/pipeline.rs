//! Extract, coerce and render in one pass.

use serde::Serialize;
use thiserror::Error;
use tracing::debug;

use crate::coerce::{CoerceError, CoercedInputs, CoercionMode, RawInputs, coerce_inputs_with_mode};
use crate::render::{RenderEngine, RenderError};
use crate::schema::extract_variables;

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error(transparent)]
    Coerce(#[from] CoerceError),

    #[error(transparent)]
    Render(#[from] RenderError),
}

/// Rendered text together with the values it was rendered from.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderOutput {
    pub result: String,
    pub inputs: CoercedInputs,
}

/// Render `template` from raw user input.
///
/// The schema is re-extracted from the template text on every call.
///
/// # Errors
///
/// Returns [`PipelineError::Coerce`] for malformed input in strict mode and
/// [`PipelineError::Render`] when the engine fails.
pub fn render_template<E: RenderEngine + ?Sized>(
    template: &str,
    raw: &RawInputs,
    engine: &E,
    mode: CoercionMode,
) -> Result<RenderOutput, PipelineError> {
    let schema = extract_variables(template);
    let inputs = coerce_inputs_with_mode(&schema, raw, mode)?;
    debug!(variables = schema.len(), values = inputs.len(), "rendering template");

    let result = engine.render(template, &inputs)?;
    Ok(RenderOutput { result, inputs })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coerce::TypedValue;
    use crate::render::JinjaRenderer;
    use serde_json::json;

    const TEMPLATE: &str = "{#- @variable name: label=\"Name\", required=true -#}\n\
{#- @variable count: type=integer, default=3 -#}\n\
{{ name }} x{{ count }}";

    #[test]
    fn test_render_template_end_to_end() {
        let raw: RawInputs = [("name".to_string(), json!("Widget"))].into_iter().collect();
        let out =
            render_template(TEMPLATE, &raw, &JinjaRenderer::new(), CoercionMode::Lenient).unwrap();
        assert_eq!(out.result, "Widget x3");
        assert_eq!(out.inputs["count"], TypedValue::from("3"));
    }

    #[test]
    fn test_render_template_missing_required_is_render_error() {
        let out = render_template(
            TEMPLATE,
            &RawInputs::new(),
            &JinjaRenderer::new(),
            CoercionMode::Lenient,
        );
        assert!(matches!(out, Err(PipelineError::Render(RenderError::UndefinedVariable(_)))));
    }

    #[test]
    fn test_render_template_strict_mode_rejects() {
        let raw: RawInputs =
            [("name".to_string(), json!("W")), ("count".to_string(), json!("many"))]
                .into_iter()
                .collect();
        let out = render_template(TEMPLATE, &raw, &JinjaRenderer::new(), CoercionMode::Strict);
        assert!(matches!(out, Err(PipelineError::Coerce(CoerceError::InvalidInteger { .. }))));
    }

    #[test]
    fn test_render_output_serializes() {
        let raw: RawInputs =
            [("name".to_string(), json!("W")), ("count".to_string(), json!("2"))]
                .into_iter()
                .collect();
        let out =
            render_template(TEMPLATE, &raw, &JinjaRenderer::new(), CoercionMode::Lenient).unwrap();
        assert_eq!(
            serde_json::to_value(&out).unwrap(),
            json!({"result": "W x2", "inputs": {"count": 2, "name": "W"}})
        );
    }
}
