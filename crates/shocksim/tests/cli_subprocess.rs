use std::path::PathBuf;
use std::process::{Command, Output};

use serde_json::Value;
use tempfile::tempdir;

fn shocksim_bin() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_shocksim"))
}

fn fixture() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("fixtures")
        .join("national_food_security.csv")
}

fn run_shocksim(args: &[&str]) -> Output {
    Command::new(shocksim_bin())
        .args(args)
        .env("SHOCKSIM_LOG", "warn")
        .output()
        .expect("run shocksim binary")
}

fn stdout_text(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn stderr_text(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

fn stdout_json(output: &Output) -> Value {
    serde_json::from_slice(&output.stdout).expect("stdout should be JSON")
}

#[test]
fn list_profiles_prints_builtins() {
    let output = run_shocksim(&["list-profiles"]);
    assert!(output.status.success(), "stderr: {}", stderr_text(&output));
    assert_eq!(stdout_text(&output), "published\nrefit\n");
}

#[test]
fn impact_json_for_default_scenario() {
    let data = fixture();
    let output = run_shocksim(&[
        "impact",
        "--shock",
        "-10",
        "--json",
        "--data",
        data.to_str().unwrap(),
    ]);
    assert!(output.status.success(), "stderr: {}", stderr_text(&output));

    let report = stdout_json(&output);
    assert_eq!(report["shock_pct"], -10.0);
    assert_eq!(report["coefficient"], -0.0987);
    assert!((report["deviation"].as_f64().unwrap() - 0.987).abs() < 1e-12);
    assert_eq!(report["sign"], "positive");
    assert_eq!(report["tone"], "success");
    assert_eq!(
        report["headline"],
        "Predicted Utilization Effect: +0.99 kcal/capita/day (Higher than Baseline)"
    );
}

#[test]
fn impact_text_for_positive_shock() {
    let data = fixture();
    let output = run_shocksim(&["impact", "--shock", "10%", "--data", data.to_str().unwrap()]);
    assert!(output.status.success(), "stderr: {}", stderr_text(&output));

    let text = stdout_text(&output);
    assert!(text.contains("Shock: 10.0%"));
    assert!(text.contains("Calculated Utilization Deviation: -0.99"));
    assert!(text.contains("(Lower than Baseline)"));
    assert!(text.contains("market saturation"));
}

#[test]
fn refit_recovers_coefficient_from_training_columns() {
    let data = fixture();
    let output = run_shocksim(&["params", "--json", "--refit", "--data", data.to_str().unwrap()]);
    assert!(output.status.success(), "stderr: {}", stderr_text(&output));

    let report = stdout_json(&output);
    let coefficient = report["shock_coefficient"].as_f64().unwrap();
    assert!((coefficient - (-0.0993)).abs() < 1e-3, "coefficient = {coefficient}");
    assert_eq!(report["source"]["kind"], "refit");
    assert_eq!(report["source"]["observations"], 22);
    assert_eq!(report["baseline"][1]["value"], "2469.50 kcal/cap/day (Avg.)");
}

#[test]
fn refit_profile_matches_refit_flag() {
    let data = fixture();
    let output = run_shocksim(&[
        "params",
        "--profile",
        "refit",
        "--data",
        data.to_str().unwrap(),
    ]);
    assert!(output.status.success(), "stderr: {}", stderr_text(&output));
    assert!(stdout_text(&output).contains("Source: refit (n=22"));
}

#[test]
fn missing_data_file_exits_with_code_two() {
    let dir = tempdir().unwrap();
    let missing = dir.path().join("processed.csv");
    let output = run_shocksim(&["params", "--data", missing.to_str().unwrap()]);

    assert_eq!(output.status.code(), Some(2));
    assert!(stdout_text(&output).is_empty());
    assert!(stderr_text(&output).contains("was not found"));
}

#[test]
fn out_of_range_shock_exits_with_code_one() {
    let data = fixture();
    let output = run_shocksim(&["impact", "--shock", "-25", "--data", data.to_str().unwrap()]);
    assert_eq!(output.status.code(), Some(1));
    assert!(stderr_text(&output).contains("outside [-20, 20]"));
}

#[test]
fn off_grid_shock_snaps_to_half_percent() {
    let data = fixture();
    let output = run_shocksim(&[
        "impact",
        "--shock",
        "3.3",
        "--json",
        "--data",
        data.to_str().unwrap(),
    ]);
    assert!(output.status.success(), "stderr: {}", stderr_text(&output));

    let report = stdout_json(&output);
    assert_eq!(report["shock_pct"], 3.5);
    assert!((report["deviation"].as_f64().unwrap() - (-0.0987 * 3.5)).abs() < 1e-12);
}

#[test]
fn log_filter_flag_overrides_environment() {
    let data = fixture();
    let output = Command::new(shocksim_bin())
        .args(["params", "--log-filter", "debug", "--data", data.to_str().unwrap()])
        .env("SHOCKSIM_LOG", "error")
        .output()
        .expect("run shocksim binary");
    assert!(output.status.success(), "stderr: {}", stderr_text(&output));
    assert!(stderr_text(&output).contains("settings.resolved"));
}

#[test]
fn config_file_supplies_data_path() {
    let dir = tempdir().unwrap();
    let config = dir.path().join("shocksim.env");
    std::fs::write(
        &config,
        format!("data_path=\"{}\"\ncoefficient=refit\n", fixture().display()),
    )
    .unwrap();

    let output = run_shocksim(&["params", "--json", "--config", config.to_str().unwrap()]);
    assert!(output.status.success(), "stderr: {}", stderr_text(&output));
    assert_eq!(stdout_json(&output)["source"]["kind"], "refit");
}
