//! toctree CLI - documentation navigation manifest toolkit.
//!
//! Provides commands for:
//! - `check`: Validate manifests against their source pages
//! - `fmt`: Rewrite manifests in canonical form
//! - `show`: Print a manifest as a tree or navigation JSON
//! - `coverage`: Compare a translated manifest with the reference locale

mod commands;
mod error;
mod output;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::{CheckArgs, CoverageArgs, FmtArgs, ShowArgs};
use output::Output;

/// toctree - Documentation navigation manifest toolkit.
#[derive(Parser)]
#[command(name = "toctree", version, about)]
struct Cli {
    /// Enable verbose output (debug logs for loading and scanning).
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate manifests and their page references.
    Check(CheckArgs),
    /// Rewrite manifests in canonical form.
    Fmt(FmtArgs),
    /// Print a manifest tree.
    Show(ShowArgs),
    /// Report translation coverage for a locale.
    Coverage(CoverageArgs),
}

fn main() {
    let cli = Cli::parse();
    let output = Output::new();

    // --verbose enables DEBUG level, otherwise use RUST_LOG or default to WARN
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let result = match cli.command {
        Commands::Check(args) => args.execute(),
        Commands::Fmt(args) => args.execute(),
        Commands::Show(args) => args.execute(),
        Commands::Coverage(args) => args.execute(),
    };

    if let Err(err) = result {
        output.error(&format!("Error: {err}"));
        std::process::exit(1);
    }
}
