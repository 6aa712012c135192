mod cli;
mod commands;
mod output;

use clap::Parser;
use cli::{Cli, Commands};

fn main() {
    let cli = Cli::parse();

    init_tracing(cli.verbose);

    let result = match cli.command {
        Commands::Init(args) => commands::init::run(args, cli.verbose),
        Commands::Render {
            file,
            context,
            vars,
            output,
        } => commands::render::run(file, context, vars, output, cli.verbose),
        Commands::Check { file, json } => commands::check::run(file, json, cli.verbose),
        Commands::List { json } => commands::list::run(json, cli.verbose),
    };

    // `{:#}` keeps the cause after any added context
    if let Err(e) = result {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

/// Log to stderr; `RUST_LOG` overrides the level picked by `--verbose`
fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .try_init();
}
