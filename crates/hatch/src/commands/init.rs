//! Init command - generate a project from a template

use crate::cli::InitArgs;
use crate::output::print_json;
use anyhow::Result;
use colored::Colorize;
use hatch_core::config::consts::vars::{PROJECT_NAME, RUNTIME};
use hatch_core::scaffold::{
    generate, validate_name, GenerateOptions, GenerateReport, OnError, TemplateSource,
};

/// Generate a project
///
/// # Arguments
///
/// * `args` - Parsed `hatch init` arguments
/// * `verbose` - Enable verbose output if true
pub fn run(args: InitArgs, verbose: bool) -> Result<()> {
    let source = TemplateSource::resolve(&args.template)?;
    tracing::debug!("Resolved template '{}' from {:?}", source.name(), source.origin);

    let mut overrides = args.vars;
    if let Some(name) = args.name {
        overrides.push((PROJECT_NAME.to_string(), name));
    }
    if let Some(runtime) = args.runtime {
        overrides.push((RUNTIME.to_string(), runtime));
    }

    // Checked here for a friendlier message than a path error during generation
    for (key, value) in &overrides {
        if key == PROJECT_NAME {
            validate_name(value)?;
        }
    }

    let context = source.manifest.build_context(overrides)?;

    if verbose && !args.json {
        println!(
            "{} Generating '{}' into {}",
            "→".cyan(),
            source.name(),
            args.output.display()
        );
    }

    let options = GenerateOptions {
        on_error: if args.skip_errors {
            OnError::Skip
        } else {
            OnError::Abort
        },
        overwrite: args.overwrite,
    };

    let report = generate(&source, &context, &args.output, &options)?;

    if args.json {
        return print_json(&report);
    }

    print_report(&report, verbose);
    Ok(())
}

fn print_report(report: &GenerateReport, verbose: bool) {
    for root in &report.roots {
        println!(
            "{} Created {}",
            "✓".green().bold(),
            report.destination.join(root).display()
        );
    }

    if verbose {
        println!("\n{} Files:", "→".cyan());
        for path in &report.written {
            println!("  - {}", path.display());
        }
    }

    for skipped in &report.skipped {
        println!(
            "{} Skipped {}: {}",
            "!".yellow().bold(),
            skipped.path,
            skipped.error
        );
    }

    if let [root] = report.roots.as_slice() {
        let project_dir = report.destination.join(root);
        if project_dir.is_dir() {
            println!("\n{} Next steps:", "→".cyan());
            println!("  cd {}", project_dir.display());
        }
    }
}
