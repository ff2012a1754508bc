use minijinja::{Environment, ErrorKind, UndefinedBehavior};
use thiserror::Error;

use crate::coerce::CoercedInputs;

use super::value::to_context;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RenderError {
    #[error("rendering error: invalid template syntax: {0}")]
    Syntax(String),

    #[error("rendering error: undefined variable: {0}")]
    UndefinedVariable(String),

    #[error("rendering error: {0}")]
    Other(String),
}

impl From<minijinja::Error> for RenderError {
    fn from(e: minijinja::Error) -> Self {
        match e.kind() {
            ErrorKind::SyntaxError => RenderError::Syntax(e.to_string()),
            ErrorKind::UndefinedError => RenderError::UndefinedVariable(e.to_string()),
            _ => RenderError::Other(e.to_string()),
        }
    }
}

/// Substitutes coerced values into template text.
///
/// Implementations must treat `{# ... #}` comments (including the
/// whitespace-trimming `{#- ... -#}` form used for declarations) as
/// non-emitting, and fail on unresolved variables or malformed syntax.
pub trait RenderEngine {
    /// Render `template` with `values` in scope.
    ///
    /// # Errors
    ///
    /// Returns a [`RenderError`] for malformed syntax, undefined variables
    /// or any other failure raised while evaluating the template.
    fn render(&self, template: &str, values: &CoercedInputs) -> Result<String, RenderError>;
}

/// Jinja-compatible renderer backed by `minijinja`.
///
/// Undefined variables are errors rather than empty strings. Datetime
/// values expose `year`, `month`, `day`, `hour`, `minute`, `second` and
/// `microsecond`, plus `strftime(pattern)` and `isoformat()`.
pub struct JinjaRenderer {
    env: Environment<'static>,
}

impl JinjaRenderer {
    #[must_use]
    pub fn new() -> Self {
        let mut env = Environment::new();
        env.set_undefined_behavior(UndefinedBehavior::Strict);
        Self { env }
    }
}

impl Default for JinjaRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl RenderEngine for JinjaRenderer {
    fn render(&self, template: &str, values: &CoercedInputs) -> Result<String, RenderError> {
        Ok(self.env.render_str(template, to_context(values))?)
    }
}
