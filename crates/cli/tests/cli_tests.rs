//! CLI integration tests

use std::process::Command;

fn mecp(args: &[&str]) -> std::process::Output {
    Command::new("cargo")
        .args(["run", "-q", "-p", "mecp-cli", "--"])
        .args(args)
        .output()
        .expect("Failed to execute command")
}

/// Test that the CLI shows help
#[test]
fn test_cli_help() {
    let output = mecp(&["--help"]);
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(output.status.success(), "CLI help should succeed");
    assert!(
        stdout.contains("Metal Extraction Cost Predictor"),
        "Should show app name"
    );
    assert!(stdout.contains("estimate"), "Should show estimate command");
    assert!(stdout.contains("model"), "Should show model command");
    assert!(stdout.contains("metals"), "Should show metals command");
    assert!(stdout.contains("thermo"), "Should show thermo command");
}

/// Test that the CLI shows version
#[test]
fn test_cli_version() {
    let output = mecp(&["--version"]);
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(output.status.success(), "CLI version should succeed");
    assert!(stdout.contains("mecp"), "Should show binary name");
}

/// Test estimate subcommand help lists every field flag
#[test]
fn test_estimate_help() {
    let output = mecp(&["estimate", "--help"]);
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(output.status.success());
    for flag in [
        "--metal",
        "--delta-g",
        "--electrode-potential",
        "--enthalpy",
        "--ore-grade",
        "--melting-point",
        "--boiling-point",
        "--export",
    ] {
        assert!(stdout.contains(flag), "Should show {}", flag);
    }
}

/// Metals listing works without a running service
#[test]
fn test_metals_json_offline() {
    let output = mecp(&["--format", "json", "metals", "copper"]);
    assert!(output.status.success());

    let metals: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(metals[0]["name"], "Copper");
    assert_eq!(metals[0]["ore_grade"], 1.2);
}

/// Thermo curve works without a running service
#[test]
fn test_thermo_curve_json_offline() {
    let output = mecp(&[
        "--format",
        "json",
        "thermo",
        "curve",
        "--delta-h",
        "-50",
        "--delta-s",
        "-0.25",
        "--points",
        "3",
    ]);
    assert!(output.status.success());

    let curve: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(curve["points"].as_array().unwrap().len(), 3);
    assert_eq!(curve["crossover_temperature"], 200.0);
}

/// Missing inputs are rejected locally before any request is sent
#[test]
fn test_estimate_missing_delta_g_fails() {
    let output = Command::new("cargo")
        .args(["run", "-q", "-p", "mecp-cli", "--", "estimate", "--metal", "Gold"])
        .env("MECP_API_URL", "http://127.0.0.1:9")
        .output()
        .expect("Failed to execute command");

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("delta_g"));
}

/// `estimate --export` writes a record that re-parses through the schema
#[test]
fn test_estimate_export_writes_parseable_record() {
    let mut server = mockito::Server::new();
    server
        .mock("POST", "/api/v1/estimate")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            serde_json::json!({
                "features": {
                    "delta_g": -146.0,
                    "electrode_potential": 0.34,
                    "enthalpy": 219.0,
                    "ore_grade": 1.2,
                    "melting_point": 1085.0,
                    "boiling_point": 2562.0
                },
                "estimate": 612.5,
                "uncertainty": 100.0,
                "model_version": "v1.0.0",
                "display": "$612.50 per ton ± $100.00"
            })
            .to_string(),
        )
        .create();

    let dir = tempfile::TempDir::new().unwrap();
    let path = dir.path().join("estimate.csv");

    let output = Command::new("cargo")
        .args(["run", "-q", "-p", "mecp-cli", "--", "estimate", "--metal", "Copper"])
        .arg("--export")
        .arg(&path)
        .env("MECP_API_URL", server.url())
        .output()
        .expect("Failed to execute command");
    assert!(
        output.status.success(),
        "{}",
        String::from_utf8_lossy(&output.stderr)
    );

    let text = std::fs::read_to_string(&path).unwrap();
    let record = estimator_lib::ExportRecord::parse(&text).unwrap();
    assert_eq!(record.estimated_cost, 612.5);
    assert_eq!(record.features.ore_grade, 1.2);
    assert_eq!(record.features.delta_g, -146.0);
}
