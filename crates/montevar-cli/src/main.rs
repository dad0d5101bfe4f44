//! Montevar CLI - Monte Carlo Value at Risk from the command line.
//!
//! # Usage
//!
//! ```bash
//! # Estimate 5-day 95% VaR for an equal-weight portfolio
//! montevar run --prices prices.csv --tickers SPY,BND,GLD --seed 42
//!
//! # Same run driven by a config file, as JSON
//! montevar --format json run --prices prices.csv --config montevar.toml
//!
//! # Mean returns and covariance of the inputs
//! montevar stats --prices prices.csv --tickers SPY,BND
//!
//! # Write a starter config
//! montevar config init --output montevar.toml
//! ```

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

mod cli;
mod commands;
mod error;
mod output;

use cli::{Cli, Commands};

fn main() -> Result<()> {
    let cli = Cli::parse();

    init_tracing(cli.verbose, cli.quiet);

    let format = cli.format;

    match cli.command {
        Commands::Run(args) => commands::run::execute(args, format, cli.quiet)?,
        Commands::Stats(args) => commands::stats::execute(args, format)?,
        Commands::Config(args) => commands::config::execute(args, format)?,
    }

    Ok(())
}

/// Logs go to stderr so stdout stays parseable.
fn init_tracing(verbose: bool, quiet: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        let fallback = if quiet { "error" } else { "warn" };
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
