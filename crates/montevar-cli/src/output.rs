//! Output formatting utilities.

use colored::Colorize;
use serde::Serialize;
use tabled::{
    settings::{object::Columns, Alignment, Modify, Style},
    Table, Tabled,
};

use montevar_risk::simulation::Histogram;

use crate::cli::OutputFormat;

/// Width of the longest histogram bar in characters.
const HISTOGRAM_WIDTH: usize = 40;

/// Formats and prints output based on the specified format.
pub fn print_output<T: Serialize + Tabled>(data: &[T], format: OutputFormat) -> anyhow::Result<()> {
    match format {
        OutputFormat::Table => print_table(data),
        OutputFormat::Json => print_json(data),
        OutputFormat::Csv => print_csv(data),
        OutputFormat::Minimal => print_minimal(data),
    }
}

/// Prints data as a formatted table.
fn print_table<T: Tabled>(data: &[T]) -> anyhow::Result<()> {
    if data.is_empty() {
        println!("No results.");
        return Ok(());
    }

    let table = Table::new(data)
        .with(Style::rounded())
        .with(Modify::new(Columns::first()).with(Alignment::left()))
        .to_string();

    println!("{}", table);
    Ok(())
}

/// Prints a serializable value as pretty JSON.
pub fn print_json<T: Serialize + ?Sized>(data: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(data)?);
    Ok(())
}

/// Prints data as CSV.
fn print_csv<T: Serialize>(data: &[T]) -> anyhow::Result<()> {
    let mut wtr = csv::Writer::from_writer(std::io::stdout());
    for item in data {
        wtr.serialize(item)?;
    }
    wtr.flush()?;
    Ok(())
}

/// Prints minimal output (first value only).
fn print_minimal<T: Serialize>(data: &[T]) -> anyhow::Result<()> {
    if let Some(first) = data.first() {
        println!("{}", serde_json::to_string(first)?);
    }
    Ok(())
}

/// Prints a success message.
pub fn print_success(message: &str) {
    println!("{} {}", "✓".green(), message);
}

/// Prints a warning message.
pub fn print_warning(message: &str) {
    eprintln!("{} {}", "⚠".yellow(), message);
}

/// Prints an info message.
pub fn print_info(message: &str) {
    println!("{} {}", "ℹ".blue(), message);
}

/// A key-value pair for display.
#[derive(Debug, Clone, Serialize, Tabled)]
pub struct KeyValue {
    #[tabled(rename = "Metric")]
    pub key: String,
    #[tabled(rename = "Value")]
    pub value: String,
}

impl KeyValue {
    /// Creates a new key-value pair.
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }

    /// Creates a key-value pair from a float with fixed precision.
    pub fn from_f64(key: impl Into<String>, value: f64, precision: usize) -> Self {
        Self {
            key: key.into(),
            value: format!("{:.prec$}", value, prec = precision),
        }
    }

    /// Creates a key-value pair formatted as percentage.
    pub fn from_percent(key: impl Into<String>, value: f64) -> Self {
        Self {
            key: key.into(),
            value: format!("{:.4}%", value * 100.0),
        }
    }
}

/// Prints a header for a section.
pub fn print_header(title: &str) {
    println!("\n{}", title.bold().underline());
}

/// Renders a density histogram as horizontal bars, flagging the bin that
/// holds `marker`.
pub fn render_histogram(histogram: &Histogram, marker: Option<f64>) -> String {
    let peak = histogram.counts.iter().copied().max().unwrap_or(0).max(1);
    let marked = marker.and_then(|m| histogram.bin_index(m));

    let mut out = String::new();
    for (i, &count) in histogram.counts.iter().enumerate() {
        let bar_len = count * HISTOGRAM_WIDTH / peak;
        let bar = "█".repeat(bar_len);
        let bar = if Some(i) == marked {
            bar.red().to_string()
        } else {
            bar.cyan().to_string()
        };
        let flag = if Some(i) == marked { "  ◀ VaR" } else { "" };

        out.push_str(&format!(
            "{:>14.4} │{:<width$} {:>8.4}{}\n",
            histogram.edges[i],
            bar,
            histogram.densities[i],
            flag,
            width = HISTOGRAM_WIDTH
        ));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use montevar_risk::simulation::ScenarioSet;

    #[test]
    fn test_histogram_marks_var_bin() {
        colored::control::set_override(false);
        let set = ScenarioSet::from_values(vec![-2.0, -1.0, 0.0, 1.0, 2.0, 2.0]);
        let hist = set.histogram(4).unwrap();

        let text = render_histogram(&hist, Some(-1.8));
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines.len(), 4);
        assert!(lines[0].ends_with("◀ VaR"));
        assert_eq!(text.matches("◀ VaR").count(), 1);
    }

    #[test]
    fn test_key_value_formatting() {
        assert_eq!(KeyValue::from_f64("x", 1.23456, 2).value, "1.23");
        assert_eq!(KeyValue::from_percent("p", 0.0125).value, "1.2500%");
    }
}
