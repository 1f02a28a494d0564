//! CLI frontend for the Lastzug truck assignment engine.

mod commands;
mod manifest;

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "lz",
    about = "Lastzug — assign package batches to trucks by volume",
    version,
    propagate_version = true
)]
struct Cli {
    /// Log engine decisions to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Register the manifest's trucks and packages and assign every batch
    Plan {
        /// Path to the JSON manifest
        manifest: PathBuf,

        /// Minimum fill percentage a truck must reach (overrides the manifest)
        #[arg(short, long)]
        threshold: Option<f64>,

        /// Count space already loaded by earlier batches as taken
        #[arg(long)]
        residual: bool,

        /// Output format: table, json
        #[arg(short, long, default_value = "table")]
        format: String,

        /// Write the final truck loads as JSON to this file
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Validate a manifest without assigning anything
    Check {
        /// Path to the JSON manifest
        manifest: PathBuf,
    },
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = match cli.command {
        Commands::Plan {
            manifest,
            threshold,
            residual,
            format,
            output,
        } => commands::plan::run(
            &manifest,
            &commands::plan::PlanOptions {
                threshold,
                residual,
                format,
                output,
            },
        ),
        Commands::Check { manifest } => commands::check::run(&manifest),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        process::exit(1);
    }
}

/// `RUST_LOG` wins; otherwise warnings only, or debug with `--verbose`.
fn init_logging(verbose: bool) {
    let fallback = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}
