mod cmd;
mod logging;
mod prompt;

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use templator_core::config::{ConfigLoader, default_config_path};

#[derive(Debug, Parser)]
#[command(
    name = "templator",
    version,
    about = "Fill annotated text templates with typed variables"
)]
struct Cli {
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Validate configuration and print resolved settings
    Doctor,

    /// List the variables a template declares
    Vars(VarsArgs),

    /// Render a template from supplied or prompted values
    Render(RenderArgs),
}

#[derive(Debug, Args)]
pub struct VarsArgs {
    /// Template file to inspect
    pub template: PathBuf,

    /// Print the schema as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Args)]
pub struct RenderArgs {
    /// Template file to render
    pub template: PathBuf,

    /// Variable value (repeatable)
    #[arg(long = "var", value_name = "KEY=VALUE", value_parser = parse_key_val)]
    pub vars: Vec<(String, String)>,

    /// JSON object file with raw input values; --var entries take precedence
    #[arg(long)]
    pub inputs: Option<PathBuf>,

    /// Never prompt; fail if a required variable has no value or default
    #[arg(long)]
    pub batch: bool,

    /// Reject malformed integer, number and datetime input
    #[arg(long)]
    pub strict: bool,

    /// Write the rendered text to this file instead of stdout
    #[arg(long)]
    pub output: Option<PathBuf>,

    /// Print the result and coerced inputs as JSON
    #[arg(long)]
    pub json: bool,
}

fn parse_key_val(s: &str) -> Result<(String, String), String> {
    s.split_once('=')
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .ok_or_else(|| format!("invalid KEY=VALUE: no '=' found in '{s}'"))
}

fn main() {
    let cli = Cli::parse();

    let cfg = match ConfigLoader::load(cli.config.as_deref()) {
        Ok(rc) => rc,
        Err(e) => {
            println!("FAIL templator");
            println!("{e}");
            if cli.config.is_none() {
                println!("looked for: {}", default_config_path().display());
            }
            std::process::exit(1);
        }
    };

    logging::init(&cfg);

    match cli.command {
        Commands::Doctor => cmd::doctor::run(&cfg),
        Commands::Vars(args) => cmd::vars::run(&args),
        Commands::Render(args) => cmd::render::run(&cfg, &args),
    }
}
