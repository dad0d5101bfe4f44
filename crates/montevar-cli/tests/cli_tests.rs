//! End-to-end tests for the `montevar` binary.

use assert_cmd::Command;
use montevar_core::Date;
use predicates::prelude::*;
use tempfile::TempDir;

/// Writes a wide price file with three instruments over 200 days.
fn price_file(dir: &TempDir) -> std::path::PathBuf {
    let mut csv = String::from("date,SPY,BND,GLD\n");
    let start = Date::from_ymd(2021, 8, 1).unwrap();
    for i in 0..200i64 {
        let t = i as f64;
        let spy = 400.0 * (0.0004 * t + 0.02 * (t * 0.7).sin()).exp();
        let bnd = 70.0 * (0.0001 * t + 0.004 * (t * 1.3).cos()).exp();
        let gld = 180.0 * (0.0002 * t + 0.012 * (t * 0.4).sin()).exp();
        let date = start.add_days(i);
        csv.push_str(&format!("{date},{spy:.4},{bnd:.4},{gld:.4}\n"));
    }
    let path = dir.path().join("prices.csv");
    std::fs::write(&path, csv).unwrap();
    path
}

fn montevar() -> Command {
    Command::cargo_bin("montevar").unwrap()
}

#[test]
fn run_minimal_is_reproducible() {
    let dir = TempDir::new().unwrap();
    let prices = price_file(&dir);

    let run = || {
        montevar()
            .args(["--format", "minimal", "run", "--tickers", "SPY,BND,GLD", "--seed", "7"])
            .arg("--prices")
            .arg(&prices)
            .output()
            .unwrap()
    };

    let first = run();
    let second = run();
    assert!(first.status.success());
    assert_eq!(first.stdout, second.stdout);

    let text = String::from_utf8(first.stdout).unwrap();
    assert!(text.trim().parse::<f64>().is_ok());
}

#[test]
fn run_json_reports_pipeline() {
    let dir = TempDir::new().unwrap();
    let prices = price_file(&dir);

    let output = montevar()
        .args(["-f", "json", "run", "-t", "SPY,GLD", "-w", "0.6,0.4", "-n", "2000", "-s", "1"])
        .arg("--prices")
        .arg(&prices)
        .output()
        .unwrap();
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["instruments"][0], "SPY");
    assert_eq!(json["simulation_count"], 2000);
    assert_eq!(json["observations"], 199);
    assert_eq!(json["histogram"]["counts"].as_array().unwrap().len(), 50);
    assert!(json["std_dev"].as_f64().unwrap() > 0.0);
}

#[test]
fn run_table_shows_histogram() {
    let dir = TempDir::new().unwrap();
    let prices = price_file(&dir);

    montevar()
        .args(["run", "--tickers", "SPY,BND", "--seed", "3", "--bins", "20"])
        .arg("--prices")
        .arg(&prices)
        .assert()
        .success()
        .stdout(predicate::str::contains("Monte Carlo Value at Risk"))
        .stdout(predicate::str::contains("◀ VaR"));
}

#[test]
fn run_writes_scenarios() {
    let dir = TempDir::new().unwrap();
    let prices = price_file(&dir);
    let out = dir.path().join("scenarios.csv");

    montevar()
        .args(["-q", "run", "--tickers", "SPY", "-n", "250", "--seed", "9"])
        .arg("--prices")
        .arg(&prices)
        .arg("--scenarios-out")
        .arg(&out)
        .assert()
        .success();

    let text = std::fs::read_to_string(&out).unwrap();
    let mut lines = text.lines();
    assert_eq!(lines.next(), Some("scenario,gain_loss"));
    assert_eq!(lines.count(), 250);
}

#[test]
fn run_rejects_bad_weights() {
    let dir = TempDir::new().unwrap();
    let prices = price_file(&dir);

    montevar()
        .args(["run", "--tickers", "SPY,BND", "--weights", "0.9,0.9"])
        .arg("--prices")
        .arg(&prices)
        .assert()
        .failure()
        .stderr(predicate::str::contains("sum to 1"));
}

#[test]
fn run_rejects_excessive_lookback() {
    let dir = TempDir::new().unwrap();
    let prices = price_file(&dir);

    montevar()
        .args(["run", "--tickers", "SPY", "--lookback", "4294967295"])
        .arg("--prices")
        .arg(&prices)
        .assert()
        .failure()
        .stderr(predicate::str::contains("lookback_days"))
        .stderr(predicate::str::contains("panicked").not());
}

#[test]
fn stats_rejects_excessive_lookback() {
    let dir = TempDir::new().unwrap();
    let prices = price_file(&dir);

    montevar()
        .args(["stats", "--lookback", "4294967295"])
        .arg("--prices")
        .arg(&prices)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid date"))
        .stderr(predicate::str::contains("panicked").not());
}

#[test]
fn run_rejects_unknown_ticker() {
    let dir = TempDir::new().unwrap();
    let prices = price_file(&dir);

    montevar()
        .args(["run", "--tickers", "SPY,QQQ"])
        .arg("--prices")
        .arg(&prices)
        .assert()
        .failure()
        .stderr(predicate::str::contains("QQQ"));
}

#[test]
fn config_init_then_run() {
    let dir = TempDir::new().unwrap();
    let prices = price_file(&dir);
    let config = dir.path().join("montevar.toml");

    montevar()
        .args(["config", "init", "--output"])
        .arg(&config)
        .assert()
        .success();

    let text = std::fs::read_to_string(&config).unwrap();
    assert!(text.contains("simulation_count = 1000"));

    // A second init refuses to clobber the file.
    montevar()
        .args(["config", "init", "--output"])
        .arg(&config)
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));

    // The default tickers include instruments missing from the price file,
    // so narrow them on the command line.
    montevar()
        .args(["-f", "minimal", "run", "--tickers", "SPY,BND,GLD", "--seed", "2"])
        .arg("--config")
        .arg(&config)
        .arg("--prices")
        .arg(&prices)
        .assert()
        .success();
}

#[test]
fn config_show_defaults() {
    montevar()
        .args(["-f", "minimal", "config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("confidence_level = 0.95"))
        .stdout(predicate::str::contains("horizon_days = 5"));
}

#[test]
fn stats_json() {
    let dir = TempDir::new().unwrap();
    let prices = price_file(&dir);

    let output = montevar()
        .args(["-f", "json", "stats"])
        .arg("--prices")
        .arg(&prices)
        .output()
        .unwrap();
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let cov = json["covariance"].as_array().unwrap();
    assert_eq!(cov.len(), 3);
    assert_eq!(cov[0][1], cov[1][0]);
    assert_eq!(json["observations"], 199);
}
