//! Run command implementation.
//!
//! Estimates portfolio VaR from a price file by Monte Carlo simulation.

use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::Args;
use serde::Serialize;

use montevar_config::{VaRConfig, Validate};
use montevar_core::Date;
use montevar_data::{CsvPriceSource, PriceSource};
use montevar_risk::calculator::{VaRCalculator, VaRReport};
use montevar_risk::simulation::{Histogram, ScenarioSet};

use crate::cli::OutputFormat;
use crate::commands::{parse_date, parse_tickers, resolve_end_date};
use crate::output::{
    print_header, print_info, print_json, print_output, print_warning, render_histogram, KeyValue,
};

/// Arguments for the run command.
#[derive(Args, Debug)]
pub struct RunArgs {
    /// Price file (long `date,ticker,adj_close` or wide `date,SPY,BND,...`)
    #[arg(short, long)]
    pub prices: PathBuf,

    /// TOML configuration file; flags below override it
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Comma-separated tickers
    #[arg(short, long, value_delimiter = ',')]
    pub tickers: Option<Vec<String>>,

    /// Comma-separated weights in ticker order (default: equal weight)
    #[arg(short, long, value_delimiter = ',')]
    pub weights: Option<Vec<f64>>,

    /// Portfolio value
    #[arg(long)]
    pub value: Option<f64>,

    /// Number of simulated scenarios
    #[arg(short = 'n', long)]
    pub simulations: Option<usize>,

    /// Horizon in trading days
    #[arg(long)]
    pub horizon: Option<u32>,

    /// Confidence level, e.g. 0.95
    #[arg(long)]
    pub confidence: Option<f64>,

    /// Random seed for a reproducible run
    #[arg(short, long, env = "MONTEVAR_SEED")]
    pub seed: Option<u64>,

    /// Simulate on all cores
    #[arg(long)]
    pub parallel: bool,

    /// Calendar days of history before the end date
    #[arg(long)]
    pub lookback: Option<u32>,

    /// Last date of the history window (YYYY-MM-DD). Defaults to the latest price.
    #[arg(long)]
    pub end_date: Option<String>,

    /// Histogram bins in table output
    #[arg(long, default_value = "50")]
    pub bins: usize,

    /// Write the simulated scenarios to this CSV file
    #[arg(long)]
    pub scenarios_out: Option<PathBuf>,
}

impl RunArgs {
    /// Loads the base configuration and applies command-line overrides.
    fn resolve_config(&self) -> Result<VaRConfig> {
        let mut config = match &self.config {
            Some(path) => VaRConfig::load(path)?,
            None => VaRConfig::default(),
        };

        if let Some(tickers) = &self.tickers {
            config.tickers = parse_tickers(tickers)?;
            // Weights from the file belong to the file's tickers.
            config.weights = None;
        }
        if let Some(weights) = &self.weights {
            config.weights = Some(weights.clone());
        }
        if let Some(value) = self.value {
            config.portfolio_value = value;
        }
        if let Some(n) = self.simulations {
            config.simulation_count = n;
        }
        if let Some(days) = self.horizon {
            config.horizon_days = days;
        }
        if let Some(level) = self.confidence {
            config.confidence_level = level;
        }
        if let Some(seed) = self.seed {
            config.seed = Some(seed);
        }
        if self.parallel {
            config.parallel = true;
        }
        if let Some(days) = self.lookback {
            config.lookback_days = days;
        }
        if let Some(end) = &self.end_date {
            config.end_date = Some(parse_date(end)?);
        }

        config.validate_or_error()?;
        Ok(config)
    }
}

/// Machine-readable run summary (scenarios are summarised, not listed).
#[derive(Debug, Serialize)]
struct RunSummary<'a> {
    instruments: Vec<&'a str>,
    weights: &'a [f64],
    start_date: Date,
    end_date: Date,
    observations: usize,
    dropped_rows: usize,
    expected_return: f64,
    std_dev: f64,
    portfolio_value: f64,
    horizon_days: u32,
    simulation_count: usize,
    seed: Option<u64>,
    confidence_level: f64,
    quantile: f64,
    var: f64,
    scenario_min: Option<f64>,
    scenario_max: Option<f64>,
    scenario_mean: Option<f64>,
    histogram: &'a Histogram,
}

impl<'a> RunSummary<'a> {
    fn new(report: &'a VaRReport, histogram: &'a Histogram) -> Self {
        Self {
            instruments: report.instruments.iter().map(|i| i.as_str()).collect(),
            weights: report.weights.as_slice(),
            start_date: report.start_date,
            end_date: report.end_date,
            observations: report.observations,
            dropped_rows: report.dropped_rows,
            expected_return: report.profile.expected_return,
            std_dev: report.profile.std_dev,
            portfolio_value: report.portfolio_value,
            horizon_days: report.horizon_days,
            simulation_count: report.simulation_count(),
            seed: report.seed,
            confidence_level: report.var.confidence_level,
            quantile: report.var.quantile,
            var: report.var.var,
            scenario_min: report.scenarios.min(),
            scenario_max: report.scenarios.max(),
            scenario_mean: report.scenarios.mean(),
            histogram,
        }
    }
}

/// Execute the run command.
pub fn execute(args: RunArgs, format: OutputFormat, quiet: bool) -> Result<()> {
    let config = args.resolve_config()?;
    let source = CsvPriceSource::new(&args.prices)?;

    let end = resolve_end_date(&source, &config.tickers, config.end_date)?;
    let start = config.start_date(end)?;
    let history = source.fetch(&config.tickers, start, end)?;

    let report = VaRCalculator::new(config.with_end_date(end)).run(&history)?;
    let histogram = report.histogram(args.bins)?;

    if let Some(path) = &args.scenarios_out {
        write_scenarios(path, &report.scenarios)?;
        if !quiet && format == OutputFormat::Table {
            print_info(&format!(
                "Wrote {} scenarios to {}",
                report.scenarios.len(),
                path.display()
            ));
        }
    }

    if report.dropped_rows > 0 && !quiet && format == OutputFormat::Table {
        print_warning(&format!(
            "{} return rows dropped because of missing prices",
            report.dropped_rows
        ));
    }

    match format {
        OutputFormat::Table => {
            print_header("Monte Carlo Value at Risk");
            print_output(&summary_rows(&report), format)?;

            if !quiet {
                print_header(&format!("Scenario Distribution ({} bins)", histogram.bins()));
                print!("{}", render_histogram(&histogram, Some(report.var.quantile)));
            }
        }
        OutputFormat::Json => {
            print_json(&RunSummary::new(&report, &histogram))?;
        }
        OutputFormat::Csv => {
            print_output(&summary_rows(&report), format)?;
        }
        OutputFormat::Minimal => {
            println!("{:.6}", report.var.var);
        }
    }

    Ok(())
}

fn summary_rows(report: &VaRReport) -> Vec<KeyValue> {
    let instruments: Vec<&str> = report.instruments.iter().map(|i| i.as_str()).collect();
    let weights: Vec<String> = report
        .weights
        .as_slice()
        .iter()
        .map(|w| format!("{w:.4}"))
        .collect();

    vec![
        KeyValue::new("Instruments", instruments.join(", ")),
        KeyValue::new("Weights", weights.join(", ")),
        KeyValue::new(
            "History Window",
            format!("{} to {}", report.start_date, report.end_date),
        ),
        KeyValue::new("Return Observations", report.observations.to_string()),
        KeyValue::new("Dropped Rows", report.dropped_rows.to_string()),
        KeyValue::from_percent("Expected Return (daily)", report.profile.expected_return),
        KeyValue::from_percent("Std Dev (daily)", report.profile.std_dev),
        KeyValue::from_f64("Portfolio Value", report.portfolio_value, 2),
        KeyValue::new("Horizon", format!("{} days", report.horizon_days)),
        KeyValue::new("Simulations", report.simulation_count().to_string()),
        KeyValue::new(
            "Seed",
            report.seed.map_or_else(|| "-".to_string(), |s| s.to_string()),
        ),
        KeyValue::from_percent("Confidence Level", report.var.confidence_level),
        KeyValue::from_f64("Tail Quantile", report.var.quantile, 6),
        KeyValue::from_f64("VaR", report.var.var, 6),
    ]
}

fn write_scenarios(path: &Path, scenarios: &ScenarioSet) -> Result<()> {
    #[derive(Serialize)]
    struct ScenarioRow {
        scenario: usize,
        gain_loss: f64,
    }

    let mut wtr = csv::Writer::from_path(path)?;
    for (scenario, &gain_loss) in scenarios.iter().enumerate() {
        wtr.serialize(ScenarioRow {
            scenario,
            gain_loss,
        })?;
    }
    wtr.flush()?;

    tracing::debug!(path = %path.display(), rows = scenarios.len(), "wrote scenarios");
    Ok(())
}
