#![cfg(feature = "cli")]
use std::{
    path::PathBuf,
    process::{Command, Output},
    str,
};

fn demo_file() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("demos/spy_semesters.json")
}

fn run(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_seasonal-returns"))
        .args(args)
        .env("RUST_LOG", "warn")
        .output()
        .expect("failed to launch seasonal-returns")
}

#[test]
fn text_report_for_demo_file() {
    let input = demo_file();
    let output = run(&["analyze", "--symbol", "spy", "--input", input.to_str().unwrap()]);

    if !output.status.success() {
        eprintln!("stderr: {}", str::from_utf8(&output.stderr).unwrap());
    }
    assert!(output.status.success(), "Binary did not exit successfully");

    let stdout = str::from_utf8(&output.stdout).unwrap();
    assert!(stdout.starts_with(
        "SPDR S&P 500 ETF Trust May-Oct vs Nov-Apr half-year return comparison"
    ));
    assert!(stdout.contains("May-Oct statistics:"));
    assert!(stdout.contains("Nov-Apr statistics:"));
    assert!(stdout.contains(&format!("{:<6} {:>10} {:>10}", 2016, "3.18", "0.73")));
    assert!(stdout.contains(&format!("{:<6} {:>10} {:>10}", 2024, "14.20", "20.42")));
}

#[test]
fn json_report_and_plot_file_for_demo_file() {
    let input = demo_file();
    let dir = tempfile::tempdir().unwrap();
    let plot = dir.path().join("plot.json");

    let output = run(&[
        "analyze",
        "--symbol",
        "SPY",
        "--source",
        "json",
        "--input",
        input.to_str().unwrap(),
        "--format",
        "json",
        "--plot-json",
        plot.to_str().unwrap(),
    ]);
    assert!(output.status.success(), "Binary did not exit successfully");

    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["symbol"], "SPY");
    assert_eq!(report["value_mode"], "returns");
    assert_eq!(report["analysis"]["paired_years"].as_array().unwrap().len(), 9);
    assert_eq!(report["analysis"]["plot_rows"].as_array().unwrap().len(), 18);

    let written: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&plot).unwrap()).unwrap();
    assert_eq!(written, report);
}

#[test]
fn unknown_symbol_fails_with_no_data_message() {
    let input = demo_file();
    let output = run(&["analyze", "--symbol", "QQQ", "--input", input.to_str().unwrap()]);

    assert!(!output.status.success(), "Expected a non-zero exit code");
    let stderr = str::from_utf8(&output.stderr).unwrap();
    assert!(
        stderr.contains("No price data for QQQ"),
        "Expected the no-data explanation, got: {stderr}"
    );
    assert!(output.stdout.is_empty());
}
