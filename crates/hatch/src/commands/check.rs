//! Check command - validate template structure

use crate::output::print_json;
use anyhow::{Context, Result, bail};
use colored::Colorize;
use hatch_core::template::Template;
use serde_json::json;
use std::fs;
use std::path::PathBuf;

/// Parse a template without rendering it and list the variables it needs
///
/// Structural errors are reported and turn into a non-zero exit.
pub fn run(file: PathBuf, json: bool, verbose: bool) -> Result<()> {
    let text = fs::read_to_string(&file)
        .with_context(|| format!("Failed to read template {}", file.display()))?;

    let template = match Template::parse(&text) {
        Ok(template) => template,
        Err(e) => {
            if json {
                print_json(&json!({
                    "file": file.display().to_string(),
                    "valid": false,
                    "error": {
                        "message": e.to_string(),
                        "line": e.line(),
                    },
                }))?;
            }
            bail!("{}: {}", file.display(), e);
        }
    };

    let variables = template.variables();

    if json {
        let variables: Vec<_> = variables
            .iter()
            .map(|var| json!({ "key": var.key, "line": var.line }))
            .collect();
        return print_json(&json!({
            "file": file.display().to_string(),
            "valid": true,
            "variables": variables,
        }));
    }

    println!("{} {} is well-formed", "✓".green().bold(), file.display());

    if variables.is_empty() {
        println!("  (no variables)");
    } else {
        println!("\n{} Variables:", "→".cyan());
        for var in &variables {
            if verbose {
                println!("  - {} (line {})", var.key, var.line);
            } else {
                println!("  - {}", var.key);
            }
        }
    }

    Ok(())
}
