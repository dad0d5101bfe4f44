//! Stats command implementation.
//!
//! Prints the mean log-return vector and the covariance matrix of a
//! price file.

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use serde::Serialize;
use tabled::{builder::Builder, settings::Style, Tabled};

use montevar_data::{CsvPriceSource, PriceSource};
use montevar_risk::returns::{LogReturnMatrix, ReturnStatistics};

use crate::cli::OutputFormat;
use crate::commands::{parse_date, parse_tickers, resolve_end_date};
use crate::output::{print_header, print_json, print_output};

/// Default lookback, matching the run configuration.
const DEFAULT_LOOKBACK_DAYS: u32 = 15 * 365;

/// Arguments for the stats command.
#[derive(Args, Debug)]
pub struct StatsArgs {
    /// Price file (long or wide CSV)
    #[arg(short, long)]
    pub prices: PathBuf,

    /// Comma-separated tickers (default: every ticker in the file)
    #[arg(short, long, value_delimiter = ',')]
    pub tickers: Option<Vec<String>>,

    /// Calendar days of history before the end date
    #[arg(long, default_value_t = DEFAULT_LOOKBACK_DAYS)]
    pub lookback: u32,

    /// Last date of the history window (YYYY-MM-DD). Defaults to the latest price.
    #[arg(long)]
    pub end_date: Option<String>,
}

/// Per-instrument summary row.
#[derive(Debug, Serialize, Tabled)]
struct InstrumentRow {
    #[tabled(rename = "Instrument")]
    instrument: String,
    #[tabled(rename = "Mean Return")]
    mean: String,
    #[tabled(rename = "Std Dev")]
    std_dev: String,
}

#[derive(Debug, Serialize)]
struct StatsOutput {
    instruments: Vec<String>,
    observations: usize,
    dropped_rows: usize,
    mean: Vec<f64>,
    std_devs: Vec<f64>,
    covariance: Vec<Vec<f64>>,
}

/// Execute the stats command.
pub fn execute(args: StatsArgs, format: OutputFormat) -> Result<()> {
    let source = CsvPriceSource::new(&args.prices)?;

    let tickers = match &args.tickers {
        Some(t) => parse_tickers(t)?,
        None => source.instruments(),
    };
    let requested_end = args.end_date.as_deref().map(parse_date).transpose()?;
    let end = resolve_end_date(&source, &tickers, requested_end)?;
    let start = end.checked_add_days(-i64::from(args.lookback))?;

    let history = source.fetch(&tickers, start, end)?;
    let returns = LogReturnMatrix::from_history(&history)?;
    let stats = ReturnStatistics::from_returns(&returns)?;

    let names: Vec<String> = stats.instruments().iter().map(ToString::to_string).collect();
    let n = names.len();
    let covariance: Vec<Vec<f64>> = (0..n)
        .map(|i| (0..n).map(|j| stats.covariance()[(i, j)]).collect())
        .collect();

    let output = StatsOutput {
        instruments: names,
        observations: stats.observations(),
        dropped_rows: returns.dropped_rows(),
        mean: stats.mean().iter().copied().collect(),
        std_devs: stats.std_devs(),
        covariance,
    };

    match format {
        OutputFormat::Table => print_tables(&output, start, end)?,
        OutputFormat::Json => print_json(&output)?,
        OutputFormat::Csv => print_covariance_csv(&output)?,
        OutputFormat::Minimal => {
            for (name, mean) in output.instruments.iter().zip(&output.mean) {
                println!("{name}={mean:.8}");
            }
        }
    }

    Ok(())
}

fn print_tables(
    output: &StatsOutput,
    start: montevar_core::Date,
    end: montevar_core::Date,
) -> Result<()> {
    print_header(&format!(
        "Daily Log-Returns {start} to {end} ({} observations, {} dropped)",
        output.observations, output.dropped_rows
    ));
    let rows: Vec<InstrumentRow> = output
        .instruments
        .iter()
        .zip(output.mean.iter().zip(&output.std_devs))
        .map(|(name, (mean, sd))| InstrumentRow {
            instrument: name.clone(),
            mean: format!("{mean:.8}"),
            std_dev: format!("{sd:.8}"),
        })
        .collect();
    print_output(&rows, OutputFormat::Table)?;

    print_header("Covariance Matrix");
    let mut builder = Builder::default();
    builder.push_record(std::iter::once(String::new()).chain(output.instruments.iter().cloned()));
    for (name, row) in output.instruments.iter().zip(&output.covariance) {
        builder.push_record(
            std::iter::once(name.clone()).chain(row.iter().map(|v| format!("{v:.3e}"))),
        );
    }
    let mut table = builder.build();
    table.with(Style::rounded());
    println!("{table}");

    Ok(())
}

fn print_covariance_csv(output: &StatsOutput) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(std::io::stdout());
    wtr.write_record(std::iter::once("instrument").chain(output.instruments.iter().map(String::as_str)))?;
    for (name, row) in output.instruments.iter().zip(&output.covariance) {
        wtr.write_record(
            std::iter::once(name.clone()).chain(row.iter().map(ToString::to_string)),
        )?;
    }
    wtr.flush()?;
    Ok(())
}
