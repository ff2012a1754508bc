//! Interactive prompts for collecting variable values.
//!
//! This module provides functionality to:
//! - Prompt users for values the caller did not supply
//! - Show labels, descriptions and placeholders from the variable schema
//! - Offer a choice list for `select` variables and a yes/no for `boolean`
//! - Support batch mode (non-interactive) for CI/scripting

use dialoguer::{theme::ColorfulTheme, Confirm, Input, Select};
use serde_json::Value;
use std::io::{self, IsTerminal};
use templator_core::coerce::RawInputs;
use templator_core::schema::{VarType, VariableSchema};

/// Options for prompting behavior.
#[derive(Debug, Clone, Default)]
pub struct PromptOptions {
    /// If true, fail on missing required variables instead of prompting.
    pub batch_mode: bool,
}

/// Error type for variable collection.
#[derive(Debug)]
pub enum PromptError {
    /// Missing required variable in batch mode.
    MissingRequired(String),
    /// IO error during prompting.
    Io(io::Error),
    /// User cancelled input.
    Cancelled,
}

impl std::fmt::Display for PromptError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PromptError::MissingRequired(name) => {
                write!(
                    f,
                    "missing required variable: {name}\n  \
                     Hint: use --var {name}=\"...\" or remove --batch"
                )
            }
            PromptError::Io(e) => write!(f, "IO error: {e}"),
            PromptError::Cancelled => write!(f, "input cancelled by user"),
        }
    }
}

impl std::error::Error for PromptError {}

impl From<io::Error> for PromptError {
    fn from(e: io::Error) -> Self {
        PromptError::Io(e)
    }
}

/// Fill in values for declared variables the caller did not provide.
///
/// Interactive sessions prompt for every missing variable, pre-filled with
/// its default. Otherwise missing variables are left for the coercer's
/// default handling, except required ones without a default, which fail.
pub fn collect_inputs(
    schema: &[VariableSchema],
    provided: RawInputs,
    options: &PromptOptions,
) -> Result<RawInputs, PromptError> {
    let is_interactive = io::stdin().is_terminal() && !options.batch_mode;
    let mut values = provided;

    for var in schema {
        if values.contains_key(&var.name) {
            continue;
        }

        if is_interactive {
            let value = prompt_for_variable(var)?;
            values.insert(var.name.clone(), value);
        } else {
            check_missing(var)?;
        }
    }

    Ok(values)
}

/// Non-interactive check for a variable with no supplied value.
fn check_missing(var: &VariableSchema) -> Result<(), PromptError> {
    if var.required && var.effective_default().is_none() {
        return Err(PromptError::MissingRequired(var.name.clone()));
    }
    Ok(())
}

fn prompt_for_variable(var: &VariableSchema) -> Result<Value, PromptError> {
    let theme = ColorfulTheme::default();

    // Show description if available
    if let Some(ref desc) = var.description {
        eprintln!("  {desc}");
    }

    match var.var_type {
        VarType::Boolean => {
            let default = var.default.as_deref() == Some("true");
            Confirm::with_theme(&theme)
                .with_prompt(&var.label)
                .default(default)
                .interact()
                .map(Value::Bool)
                .map_err(dialoguer_error_to_prompt_error)
        }
        VarType::Select if !var.options.is_empty() => prompt_select(&theme, var),
        _ => {
            let mut input = Input::<String>::with_theme(&theme)
                .with_prompt(prompt_text(var))
                .allow_empty(!var.required);
            if let Some(default) = var.effective_default() {
                input = input.default(default.to_string());
            }
            input
                .interact_text()
                .map(Value::String)
                .map_err(dialoguer_error_to_prompt_error)
        }
    }
}

fn prompt_select(theme: &ColorfulTheme, var: &VariableSchema) -> Result<Value, PromptError> {
    let mut items: Vec<String> = Vec::with_capacity(var.options.len() + 1);
    if !var.required {
        items.push("(none)".to_string());
    }
    let offset = items.len();
    items.extend(var.options.iter().cloned());

    let default_idx = var
        .effective_default()
        .and_then(|d| var.options.iter().position(|o| o == d))
        .map_or(0, |i| i + offset);

    let idx = Select::with_theme(theme)
        .with_prompt(&var.label)
        .items(&items)
        .default(default_idx)
        .interact()
        .map_err(dialoguer_error_to_prompt_error)?;

    let choice = if idx < offset { String::new() } else { items[idx].clone() };
    Ok(Value::String(choice))
}

/// Label, with the placeholder as an example hint when present.
fn prompt_text(var: &VariableSchema) -> String {
    let mut text = if var.label.is_empty() { var.name.clone() } else { var.label.clone() };
    if let Some(ref placeholder) = var.placeholder {
        text.push_str(&format!(" (e.g. {placeholder})"));
    }
    if var.var_type == VarType::Array {
        text.push_str(" [comma or newline separated]");
    }
    text
}

/// Convert dialoguer error to our PromptError.
fn dialoguer_error_to_prompt_error(e: dialoguer::Error) -> PromptError {
    match e {
        dialoguer::Error::IO(io_err) => {
            if io_err.kind() == io::ErrorKind::UnexpectedEof {
                PromptError::Cancelled
            } else {
                PromptError::Io(io_err)
            }
        }
    }
}
