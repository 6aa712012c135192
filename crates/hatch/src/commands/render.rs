//! Render command - render a single template file

use crate::output::print_text;
use anyhow::{Context, Result};
use colored::Colorize;
use hatch_core::template::{Template, TemplateContext};
use std::fs;
use std::path::{Path, PathBuf};
use toml::Value;

/// Render `file` against a TOML context plus `--var` assignments
///
/// # Arguments
///
/// * `file` - Template file
/// * `context_file` - Optional TOML file with the variable context
/// * `vars` - `KEY=VALUE` assignments applied on top of the context file
/// * `output` - Write here instead of stdout
/// * `verbose` - Enable verbose output if true
pub fn run(
    file: PathBuf,
    context_file: Option<PathBuf>,
    vars: Vec<(String, String)>,
    output: Option<PathBuf>,
    verbose: bool,
) -> Result<()> {
    let text = fs::read_to_string(&file)
        .with_context(|| format!("Failed to read template {}", file.display()))?;

    let mut context = match &context_file {
        Some(path) => load_context(path)?,
        None => TemplateContext::empty(),
    };
    for (key, value) in vars {
        context.insert(&key, Value::String(value));
    }

    let template =
        Template::parse(&text).with_context(|| format!("Failed to parse {}", file.display()))?;
    tracing::debug!(
        "Parsed {} ({} variable(s))",
        file.display(),
        template.variables().len()
    );

    let rendered = template
        .render(&context)
        .with_context(|| format!("Failed to render {}", file.display()))?;

    match output {
        Some(path) => {
            fs::write(&path, rendered)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            if verbose {
                println!(
                    "{} Rendered {} → {}",
                    "✓".green().bold(),
                    file.display(),
                    path.display()
                );
            }
        }
        None => print_text(&rendered)?,
    }

    Ok(())
}

fn load_context(path: &Path) -> Result<TemplateContext> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read context {}", path.display()))?;
    let data: Value = toml::from_str(&content)
        .with_context(|| format!("Invalid TOML in {}", path.display()))?;
    Ok(TemplateContext::new(data))
}
