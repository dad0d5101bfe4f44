//! Config command implementation.
//!
//! Shows and writes VaR run configuration files.

use std::path::PathBuf;

use anyhow::Result;
use clap::{Args, Subcommand};

use montevar_config::{VaRConfig, Validate};

use crate::cli::OutputFormat;
use crate::error::CliError;
use crate::output::{
    print_header, print_json, print_output, print_success, print_warning, KeyValue,
};

/// Arguments for the config command.
#[derive(Args, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

/// Config subcommands.
#[derive(Subcommand, Debug)]
pub enum ConfigCommand {
    /// Show a configuration (the defaults unless a file is given)
    Show(ShowArgs),

    /// Write the default configuration to a TOML file
    Init(InitArgs),
}

/// Arguments for show subcommand.
#[derive(Args, Debug)]
pub struct ShowArgs {
    /// Configuration file to display
    #[arg(short, long)]
    pub config: Option<PathBuf>,
}

/// Arguments for init subcommand.
#[derive(Args, Debug)]
pub struct InitArgs {
    /// Destination file
    #[arg(short, long, default_value = "montevar.toml")]
    pub output: PathBuf,

    /// Overwrite an existing file
    #[arg(long)]
    pub force: bool,
}

/// Execute the config command.
pub fn execute(args: ConfigArgs, format: OutputFormat) -> Result<()> {
    match args.command {
        ConfigCommand::Show(show_args) => execute_show(show_args, format),
        ConfigCommand::Init(init_args) => execute_init(init_args),
    }
}

/// Show a configuration.
fn execute_show(args: ShowArgs, format: OutputFormat) -> Result<()> {
    let config = match &args.config {
        Some(path) => VaRConfig::load(path)?,
        None => VaRConfig::default(),
    };

    match format {
        OutputFormat::Table => {
            print_header("VaR Configuration");
            print_output(&config_rows(&config), format)?;
        }
        OutputFormat::Json => print_json(&config)?,
        OutputFormat::Csv => print_output(&config_rows(&config), format)?,
        OutputFormat::Minimal => print!("{}", config.to_toml_string()?),
    }

    for problem in config.validate() {
        print_warning(&problem.to_string());
    }

    Ok(())
}

/// Write the default configuration.
fn execute_init(args: InitArgs) -> Result<()> {
    if args.output.exists() && !args.force {
        return Err(CliError::FileExists(args.output.display().to_string()).into());
    }

    VaRConfig::default().save(&args.output)?;
    print_success(&format!("Wrote {}", args.output.display()));
    Ok(())
}

fn config_rows(config: &VaRConfig) -> Vec<KeyValue> {
    let tickers: Vec<&str> = config.tickers.iter().map(|t| t.as_str()).collect();
    let weights = match &config.weights {
        Some(w) => w
            .iter()
            .map(|x| x.to_string())
            .collect::<Vec<_>>()
            .join(", "),
        None => "equal".to_string(),
    };

    vec![
        KeyValue::new("tickers", tickers.join(", ")),
        KeyValue::new("lookback_days", config.lookback_days.to_string()),
        KeyValue::new(
            "end_date",
            config
                .end_date
                .map_or_else(|| "latest".to_string(), |d| d.to_string()),
        ),
        KeyValue::new("weights", weights),
        KeyValue::new("portfolio_value", config.portfolio_value.to_string()),
        KeyValue::new("simulation_count", config.simulation_count.to_string()),
        KeyValue::new("horizon_days", config.horizon_days.to_string()),
        KeyValue::new("confidence_level", config.confidence_level.to_string()),
        KeyValue::new(
            "seed",
            config
                .seed
                .map_or_else(|| "random".to_string(), |s| s.to_string()),
        ),
        KeyValue::new("parallel", config.parallel.to_string()),
    ]
}
