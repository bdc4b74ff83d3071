//! Shared test fixtures for E2E CLI tests.
#![allow(dead_code)] // Not every test binary uses every fixture

use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tablecrop::models::{Area, DataType, PageRole};
use tablecrop::services::LayoutStore;
use tempfile::TempDir;

/// Path to the tablecrop binary
pub fn tablecrop_bin() -> &'static str {
    env!("CARGO_BIN_EXE_tablecrop")
}

/// Runs the binary with an isolated (empty) config directory.
pub fn run(args: &[&str], config_dir: &Path) -> Output {
    Command::new(tablecrop_bin())
        .env("TABLECROP_CONFIG_DIR", config_dir)
        .env_remove("RUST_LOG")
        .args(args)
        .output()
        .expect("Failed to execute command")
}

/// Two-column statement layout used across tests.
///
/// Both areas are `(0, 0) - (100, 200)`; "Date" sits at x=5 and "Amount" at
/// x=50 (x=48 on the first page).
pub fn statement_store() -> LayoutStore {
    let mut store = LayoutStore::new();
    store.set_area(PageRole::Default, Area::from_edges(0.0, 0.0, 100.0, 200.0));
    store.add_column(5.0, "Date", DataType::Date);
    store.add_column(50.0, "Amount", DataType::Number);
    store.set_active_role(PageRole::First);
    store.update_column_position(1, 48.0);
    store.set_active_role(PageRole::Default);
    store
}

/// JSON for the statement layout, as the extraction pipeline expects it.
pub const STATEMENT_JSON: &str = r#"{
  "$schema": "https://raw.githubusercontent.com/tablecrop/tablecrop/main/schema/statement-config.schema.json",
  "layout": {
    "default": { "area": [0, 0, 200, 100], "columns": [5, 50] },
    "first": { "area": [0, 0, 200, 100], "columns": [5, 48] }
  },
  "columns": { "date": "Date", "amount": "Amount" },
  "order": ["date", "amount"],
  "cleaning": {
    "numeric": ["amount"],
    "date": ["date"],
    "date_format": "%d/%m/%Y",
    "trans_detail": "below",
    "dropna": ["amount"]
  }
}
"#;

/// Writes `content` to `name` inside a fresh temp dir.
///
/// Returns the file path and the `TempDir` guard (keep it alive for the test).
pub fn write_temp_file(name: &str, content: &str) -> (PathBuf, TempDir) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let path = temp_dir.path().join(name);
    fs::write(&path, content).expect("Failed to write temp file");
    (path, temp_dir)
}

/// Converts a path to `&str` for command arguments.
pub fn arg(path: &Path) -> &str {
    path.to_str().expect("temp path is valid UTF-8")
}
