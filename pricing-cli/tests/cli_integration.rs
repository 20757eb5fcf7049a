//! Integration tests that drive the command layer with on-disk fixture files.
//!
//! These complement the unit tests inside each module (which use inline
//! strings) by exercising the full config -> CSV -> flags -> render path.

use std::path::{Path, PathBuf};

use clap::Parser;
use pretty_assertions::assert_eq;
use pricing_cli::{app, cli::Cli, scenario_loader};
use rust_decimal_macros::dec;

fn fixture(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

fn run(args: &[&str]) -> String {
    let cli = Cli::parse_from(args);
    let config = app::load_config(&cli).expect("config should load");
    let session = app::build_session(&cli, &config).expect("session should build");
    let mut out = Vec::new();
    app::run(&cli, session, "".as_bytes(), &mut out).expect("command should succeed");
    String::from_utf8(out).expect("output is utf-8")
}

#[test]
fn test_fixture_csv_skips_blank_names() {
    let scenarios = scenario_loader::load_from_file(&fixture("scenarios.csv"))
        .expect("fixture file should load without error");

    assert_eq!(scenarios.len(), 2);
    assert_eq!(scenarios[0].name(), "Dealer promo");
    assert_eq!(scenarios[1].freight_per_thousand(), dec!(80));
}

#[test]
fn test_config_and_csv_scenarios_are_listed_after_presets() {
    let config = fixture("pricing.toml");
    let scenarios = fixture("scenarios.csv");
    let cli = Cli::parse_from([
        "buyer-price",
        "--config",
        config.to_str().unwrap(),
        "--scenarios",
        scenarios.to_str().unwrap(),
    ]);
    let config = app::load_config(&cli).unwrap();

    let session = app::build_session(&cli, &config).unwrap();

    let names: Vec<&str> = session.scenarios().iter().map(|s| s.name()).collect();
    assert_eq!(
        names,
        vec![
            "Standard",
            "Low Fee",
            "High Fee",
            "No Freight",
            "Config scenario",
            "Dealer promo",
            "Rush freight"
        ]
    );
    assert_eq!(session.inputs().dealer_cost(), dec!(20000));
    assert_eq!(session.inputs().buyer_percentage(), dec!(25));
}

#[test]
fn test_compare_with_config_inputs() {
    let config = fixture("pricing.toml");

    let output = run(&["buyer-price", "--config", config.to_str().unwrap(), "compare"]);

    // base 5,000 + fee 350 + freight 1,000
    let current = output.lines().nth(2).unwrap();
    assert!(current.starts_with("Current"));
    assert!(current.contains("$6,350.00"));

    // fee 500, no freight: 5,500 vs 6,350
    let config_row = output
        .lines()
        .find(|l| l.starts_with("Config scenario"))
        .unwrap();
    assert!(config_row.contains("$5,500.00"));
    assert!(config_row.ends_with("-$850.00"));
}

#[test]
fn test_what_if_spec_example() {
    let output = run(&["buyer-price", "what-if"]);

    let plus_two = output.lines().find(|l| l.starts_with("+2%")).unwrap();
    assert!(plus_two.contains("9%"));
    assert!(plus_two.contains("$5,950.00"));
    assert!(plus_two.ends_with("+$100.00"));
}

#[test]
fn test_show_json_output() {
    let output = run(&["buyer-price", "--fee", "5", "show", "--format", "json"]);

    let value: serde_json::Value = serde_json::from_str(&output).unwrap();
    assert_eq!(value["inputs"]["transaction_fee_percent"], "5");
    assert_eq!(value["formulas"].as_array().map(Vec::len), Some(0));
}

#[test]
fn test_missing_config_file_fails() {
    let cli = Cli::parse_from(["buyer-price", "--config", "/definitely/not/here.toml"]);

    assert!(app::load_config(&cli).is_err());
}
