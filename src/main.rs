//! TableCrop - bank statement table extraction configurator
//!
//! Headless entry point: inspect, validate, create, and normalize the JSON
//! configuration documents consumed by the statement extraction pipeline.

use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use tablecrop::cli::{
    CliResult, ConfigArgs, InspectArgs, NewArgs, NormalizeArgs, ValidateArgs,
};

/// TableCrop - bank statement table extraction configurator
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose (debug) logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Show the areas, columns, and cleaning options of a configuration
    Inspect(InspectArgs),
    /// Validate a configuration file for errors and warnings
    Validate(ValidateArgs),
    /// Create a configuration from an area and column boundaries
    New(NewArgs),
    /// Rewrite a configuration in canonical form
    Normalize(NormalizeArgs),
    /// Manage application configuration
    Config(ConfigArgs),
}

impl Command {
    fn execute(&self) -> CliResult<()> {
        match self {
            Command::Inspect(args) => args.execute(),
            Command::Validate(args) => args.execute(),
            Command::New(args) => args.execute(),
            Command::Normalize(args) => args.execute(),
            Command::Config(args) => args.execute(),
        }
    }
}

fn main() {
    let cli = Cli::parse();

    // Logs go to stderr so JSON on stdout stays machine-readable
    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    if let Err(err) = cli.command.execute() {
        eprintln!("Error: {err}");
        std::process::exit(err.exit_code.code());
    }
}
