//! CLI command structure using clap

use clap::{Args, Parser, Subcommand};
use hatch_core::config::consts::DEFAULT_TEMPLATE;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "hatch")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Generate a project from a template
    Init(InitArgs),

    /// Render a single template file
    Render {
        /// Template file to render
        file: PathBuf,

        /// TOML file providing the variable context
        #[arg(short, long)]
        context: Option<PathBuf>,

        /// Set a variable (dotted keys allowed), e.g. `--var cookiecutter.runtime=nodejs8.10`
        #[arg(long = "var", value_name = "KEY=VALUE", value_parser = parse_assignment)]
        vars: Vec<(String, String)>,

        /// Write the result to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Check a template file for structural errors
    Check {
        /// Template file to check
        file: PathBuf,

        #[arg(long)]
        json: bool,
    },

    /// List builtin templates
    List {
        #[arg(long)]
        json: bool,
    },
}

#[derive(Args)]
pub struct InitArgs {
    /// Builtin template name or path to a template directory
    #[arg(short, long, env = "HATCH_TEMPLATE", default_value = DEFAULT_TEMPLATE)]
    pub template: String,

    /// Directory the project is created in
    #[arg(short, long, default_value = ".")]
    pub output: PathBuf,

    /// Project name (sets `project_name`)
    #[arg(short, long)]
    pub name: Option<String>,

    /// Target runtime (sets `runtime`)
    #[arg(short, long)]
    pub runtime: Option<String>,

    /// Set a template variable, e.g. `--var project_name=orders-api`
    #[arg(long = "var", value_name = "KEY=VALUE", value_parser = parse_assignment)]
    pub vars: Vec<(String, String)>,

    /// Replace an existing project directory
    #[arg(long)]
    pub overwrite: bool,

    /// Leave out files that fail to render instead of aborting
    #[arg(long)]
    pub skip_errors: bool,

    /// Output the generation report as JSON
    #[arg(long)]
    pub json: bool,
}

/// Parse a `KEY=VALUE` argument
pub fn parse_assignment(s: &str) -> Result<(String, String), String> {
    let (key, value) = s
        .split_once('=')
        .ok_or_else(|| format!("expected KEY=VALUE, got '{}'", s))?;

    let key = key.trim();
    if key.is_empty() {
        return Err(format!("missing variable name in '{}'", s));
    }

    Ok((key.to_string(), value.to_string()))
}
