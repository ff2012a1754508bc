//! Render a template from supplied or prompted values.

use crate::prompt::{collect_inputs, PromptOptions};
use crate::RenderArgs;
use serde_json::Value;
use std::fs;
use std::path::Path;
use templator_core::coerce::{CoercionMode, RawInputs};
use templator_core::config::ResolvedConfig;
use templator_core::schema::extract_variables;
use templator_core::{render_template, JinjaRenderer};
use tracing::debug;

pub fn run(cfg: &ResolvedConfig, args: &RenderArgs) {
    let text = match fs::read_to_string(&args.template) {
        Ok(t) => t,
        Err(e) => fail(&format!("failed to read template {}: {e}", args.template.display())),
    };

    let mut provided = match args.inputs.as_deref() {
        Some(path) => read_inputs_file(path).unwrap_or_else(|e| fail(&e)),
        None => RawInputs::new(),
    };
    for (key, value) in &args.vars {
        provided.insert(key.clone(), Value::String(value.clone()));
    }

    let schema = extract_variables(&text);
    let options = PromptOptions { batch_mode: args.batch };
    let raw = match collect_inputs(&schema, provided, &options) {
        Ok(v) => v,
        Err(e) => fail(&e.to_string()),
    };

    let mode = if args.strict { CoercionMode::Strict } else { cfg.coercion.mode };
    debug!(template = %args.template.display(), %mode, "rendering");

    let output = match render_template(&text, &raw, &JinjaRenderer::new(), mode) {
        Ok(o) => o,
        Err(e) => fail(&e.to_string()),
    };

    if let Some(ref path) = args.output {
        if let Err(e) = fs::write(path, &output.result) {
            fail(&format!("failed to write {}: {e}", path.display()));
        }
        println!("OK   templator render");
        println!("wrote: {}", path.display());
        return;
    }

    if args.json {
        match serde_json::to_string_pretty(&output) {
            Ok(json) => println!("{json}"),
            Err(e) => fail(&e.to_string()),
        }
    } else {
        println!("{}", output.result);
    }
}

/// Read a JSON object of raw inputs.
fn read_inputs_file(path: &Path) -> Result<RawInputs, String> {
    let s = fs::read_to_string(path)
        .map_err(|e| format!("failed to read inputs {}: {e}", path.display()))?;
    serde_json::from_str::<RawInputs>(&s)
        .map_err(|e| format!("inputs file {} must be a JSON object: {e}", path.display()))
}

fn fail(msg: &str) -> ! {
    println!("FAIL templator render");
    println!("{msg}");
    std::process::exit(1);
}
