//! List command - show builtin templates

use crate::output::print_json;
use anyhow::Result;
use colored::Colorize;
use hatch_core::config::consts::vars::RUNTIME;
use hatch_core::scaffold::{get_builtin_template, BUILTIN_TEMPLATES};
use serde_json::json;

/// List builtin templates with their descriptions and runtime choices
pub fn run(json: bool, verbose: bool) -> Result<()> {
    let mut templates = Vec::new();
    for name in BUILTIN_TEMPLATES {
        if let Some(source) = get_builtin_template(name)? {
            templates.push(source);
        }
    }

    if json {
        let output: Vec<_> = templates
            .iter()
            .map(|source| {
                json!({
                    "name": source.name(),
                    "description": source.manifest.template.description,
                    "runtimes": source.manifest.choices(RUNTIME),
                    "variables": source.manifest.variables,
                })
            })
            .collect();
        return print_json(&json!({ "templates": output }));
    }

    println!("{} Builtin templates:", "→".cyan());
    for source in &templates {
        let manifest = &source.manifest;
        match &manifest.template.description {
            Some(description) => println!("  {} - {}", source.name().bold(), description),
            None => println!("  {}", source.name().bold()),
        }

        let runtimes = manifest.choices(RUNTIME);
        if !runtimes.is_empty() {
            println!("    runtimes: {}", runtimes.join(", "));
        }

        if verbose {
            for (name, spec) in &manifest.variables {
                println!(
                    "    {} (default: {})",
                    name,
                    spec.default.as_deref().unwrap_or("required")
                );
            }
        }
    }

    Ok(())
}
