// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use std::io::Write;
use std::path::PathBuf;
use std::process::{Command, Output};

use serde_json::Value;

fn workspace_path(relative: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../..").join(relative)
}

fn run(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_inp-lite"))
        .args(args)
        .env("INP_LITE_PRETTY", "false")
        .env_remove("INP_LITE_COOLING_TABLE")
        .env_remove("INP_LITE_REFERENCE_DATA")
        .output()
        .expect("run inp-lite")
}

fn json(output: &Output) -> Value {
    assert!(
        output.status.success(),
        "{}",
        String::from_utf8_lossy(&output.stderr)
    );
    serde_json::from_slice(&output.stdout).expect("stdout is JSON")
}

#[test]
fn test_heating_command() {
    let value = json(&run(&["heating", "10000", "1", "30"]));
    assert_eq!(value["techType"], "HW Boiler");
    assert_eq!(value["metric"], "AFUE");
    assert_eq!(value["value"], 0.8);
}

#[test]
fn test_cooling_command_unsupported_category() {
    let value = json(&run(&["cooling", "10000", "42", "400"]));
    assert_eq!(value["value"], Value::Null);
    assert_eq!(value["techType"], "");
}

#[test]
fn test_parse_sample_file() {
    let sample = workspace_path("rust/processing/tests/fixtures/sample.inp");
    let value = json(&run(&["parse", sample.to_str().unwrap()]));

    assert_eq!(value["result"]["area"], "16000 SqFt");
    assert_eq!(value["result"]["chillerEir"], serde_json::json!(["Default Value"]));
    assert_eq!(value["warnings"], serde_json::json!([]));
}

#[test]
fn test_parse_reports_failures_per_file() {
    let mut bad = tempfile::NamedTempFile::new().unwrap();
    writeln!(bad, "INPUT ..").unwrap();
    writeln!(bad, "$ ---------------------------------------------------------").unwrap();

    let sample = workspace_path("rust/processing/tests/fixtures/sample.inp");
    let value = json(&run(&[
        "parse",
        sample.to_str().unwrap(),
        bad.path().to_str().unwrap(),
    ]));

    let reports = value.as_array().unwrap();
    assert_eq!(reports.len(), 2);
    assert!(reports[0]["result"].is_object());
    assert!(reports[1]["error"].as_str().unwrap().contains("delimiter"));
}

#[test]
fn test_blocks_command() {
    let sample = workspace_path("rust/processing/tests/fixtures/sample.inp");
    let value = json(&run(&["blocks", sample.to_str().unwrap()]));

    let blocks = value.as_array().unwrap();
    assert_eq!(blocks[0]["name"], "INPUT");
    assert!(blocks
        .iter()
        .any(|b| b["name"] == "Glass Types" && b["records"] == 2));
}

#[test]
fn test_baseline_command() {
    let request = workspace_path("demos/baseline_request.json");
    let reference = workspace_path("demos/reference_tables.json");
    let value = json(&run(&[
        "baseline",
        request.to_str().unwrap(),
        "--reference",
        reference.to_str().unwrap(),
    ]));

    assert_eq!(value["location"], "Denver-CO");
    assert_eq!(value["hvacSystemNumber"], 5);
    assert_eq!(value["hvacSystem"], "Packaged VAV w/ Reheat");
    assert_eq!(value["lighting"], "1.0 W/SqFt");
}

#[test]
fn test_baseline_without_reference_data_fails() {
    let request = workspace_path("demos/baseline_request.json");
    let output = run(&["baseline", request.to_str().unwrap()]);
    assert!(!output.status.success());
}
