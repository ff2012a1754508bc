//! List the variables a template declares.

use crate::VarsArgs;
use std::fs;
use tabled::{settings::Style, Table, Tabled};
use templator_core::schema::{extract_variables, VariableSchema};

/// Row for the variable table.
#[derive(Tabled)]
struct VarRow {
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Type")]
    var_type: String,
    #[tabled(rename = "Label")]
    label: String,
    #[tabled(rename = "Required")]
    required: String,
    #[tabled(rename = "Default")]
    default: String,
    #[tabled(rename = "Options")]
    options: String,
}

impl From<&VariableSchema> for VarRow {
    fn from(var: &VariableSchema) -> Self {
        Self {
            name: var.name.clone(),
            var_type: var.var_type.to_string(),
            label: var.label.clone(),
            required: if var.required { "yes" } else { "" }.to_string(),
            default: var.default.clone().unwrap_or_default(),
            options: var.options.join(", "),
        }
    }
}

pub fn run(args: &VarsArgs) {
    let text = match fs::read_to_string(&args.template) {
        Ok(t) => t,
        Err(e) => {
            println!("FAIL templator vars");
            println!("failed to read template {}: {e}", args.template.display());
            std::process::exit(1);
        }
    };

    let schema = extract_variables(&text);

    if args.json {
        match serde_json::to_string_pretty(&schema) {
            Ok(json) => println!("{json}"),
            Err(e) => {
                println!("FAIL templator vars");
                println!("{e}");
                std::process::exit(1);
            }
        }
        return;
    }

    if schema.is_empty() {
        println!("(no variables declared)");
        return;
    }

    let rows: Vec<VarRow> = schema.iter().map(VarRow::from).collect();
    let mut table = Table::new(rows);
    table.with(Style::rounded());
    println!("{table}");
    println!("-- {} variables --", schema.len());
}
