//! Template rendering.

pub mod engine;
mod value;

pub use engine::{JinjaRenderer, RenderEngine, RenderError};
