//! End-to-end tests for `tablecrop inspect` command.

mod fixtures;
use fixtures::*;

use tempfile::TempDir;

#[test]
fn test_inspect_human_readable() {
    let (path, _temp_dir) = write_temp_file("config.json", STATEMENT_JSON);
    let config_dir = TempDir::new().unwrap();

    let output = run(&["inspect", "--config", arg(&path)], config_dir.path());

    assert_eq!(
        output.status.code(),
        Some(0),
        "inspect should succeed. stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Columns (2):"));
    assert!(stdout.contains("Date"));
    assert!(stdout.contains("Amount"));
    assert!(stdout.contains("%d/%m/%Y"));
    assert!(stdout.contains("(0, 0) - (100, 200)"));
}

#[test]
fn test_inspect_json() {
    let (path, _temp_dir) = write_temp_file("config.json", STATEMENT_JSON);
    let config_dir = TempDir::new().unwrap();

    let output = run(&["inspect", "--config", arg(&path), "--json"], config_dir.path());
    assert_eq!(output.status.code(), Some(0));

    let stdout = String::from_utf8_lossy(&output.stdout);
    let result: serde_json::Value =
        serde_json::from_str(&stdout).expect("Should parse JSON output");

    assert_eq!(result["areas"]["default"]["x2"], 100.0);
    assert_eq!(result["areas"]["first"]["height"], 200.0);

    let columns = result["columns"].as_array().expect("columns array");
    assert_eq!(columns.len(), 2);
    assert_eq!(columns[1]["key"], "amount");
    assert_eq!(columns[1]["name"], "Amount");
    assert_eq!(columns[1]["type"], "number");
    assert_eq!(columns[1]["default_position"], 50.0);
    assert_eq!(columns[1]["first_position"], 48.0);

    assert_eq!(result["cleaning"]["trans_detail"], "below");
    assert_eq!(result["cleaning"]["drop_empty"], serde_json::json!(["Amount"]));
}

#[test]
fn test_inspect_single_layout_document() {
    let (path, _temp_dir) = write_temp_file(
        "single.json",
        r#"{
            "layout": { "default": { "area": [10, 20, 300, 400], "columns": [25] } },
            "columns": { "date": "Date" },
            "order": ["date"]
        }"#,
    );
    let config_dir = TempDir::new().unwrap();

    let output = run(&["inspect", "--config", arg(&path), "--json"], config_dir.path());
    assert_eq!(output.status.code(), Some(0));

    let result: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(result["areas"]["first"], result["areas"]["default"]);
    assert_eq!(result["columns"][0]["first_position"], 25.0);
    assert_eq!(result["columns"][0]["type"], "string");
    assert_eq!(result["cleaning"]["date_format"], "%y/%m/%d");
}

#[test]
fn test_inspect_missing_file() {
    let config_dir = TempDir::new().unwrap();
    let missing = config_dir.path().join("nope.json");

    let output = run(&["inspect", "--config", arg(&missing)], config_dir.path());

    assert_eq!(output.status.code(), Some(2), "Missing file is an I/O error");
    assert!(String::from_utf8_lossy(&output.stderr).contains("Error:"));
}

#[test]
fn test_inspect_rejects_inconsistent_document() {
    let (path, _temp_dir) = write_temp_file(
        "bad.json",
        r#"{
            "layout": { "default": { "area": [0, 0, 10, 10], "columns": [1] } },
            "columns": {},
            "order": ["ghost"]
        }"#,
    );
    let config_dir = TempDir::new().unwrap();

    let output = run(&["inspect", "--config", arg(&path)], config_dir.path());

    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("ghost"));
}
