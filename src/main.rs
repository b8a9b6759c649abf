//! datacache - Reproducible, integrity-checked dataset caching
//!
//! datacache provides:
//! - Deterministic synthetic dataset generation from (seed, point count)
//! - A file-backed cache keyed by those parameters
//! - SHA-256 verification of every cached artifact before reuse
//! - Unified output format (jsonl/json/md)

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

mod cache;
mod cli;
mod commands;
mod core;
mod generator;

/// Log to stderr so stdout stays machine-readable. RUST_LOG wins over flags.
fn init_logging(quiet: bool, verbose: bool) {
    let default_level = if quiet {
        "error"
    } else if verbose {
        "debug"
    } else {
        "warn"
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() -> Result<()> {
    let cli = cli::Cli::parse();
    init_logging(cli.quiet, cli.verbose);
    cli::run(cli)
}
