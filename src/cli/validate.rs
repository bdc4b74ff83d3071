//! Validation command for configuration documents.

use crate::cli::common::{print_json, CliError, CliResult, ValidationMessage};
use crate::models::{Area, PageRole};
use crate::parser::document::ConfigDocument;
use crate::parser::keys::to_snake_case;
use crate::parser::{import_document, parse_document};
use crate::services::LayoutFragment;
use clap::Args;
use serde::Serialize;
use std::collections::{BTreeMap, HashMap, HashSet};
use std::fs;
use std::path::PathBuf;

/// Validate a configuration file for errors and warnings
#[derive(Debug, Clone, Args)]
pub struct ValidateArgs {
    /// Path to configuration JSON file
    #[arg(short, long, value_name = "FILE")]
    pub config: PathBuf,

    /// Output results as JSON
    #[arg(long)]
    pub json: bool,

    /// Treat warnings as errors (exit non-zero)
    #[arg(long)]
    pub strict: bool,
}

/// JSON response for the validate command.
#[derive(Debug, Serialize)]
struct ValidationResponse {
    valid: bool,
    columns: usize,
    issues: Vec<ValidationMessage>,
}

impl ValidateArgs {
    /// Execute the validate command
    pub fn execute(&self) -> CliResult<()> {
        let content = fs::read_to_string(&self.config).map_err(|e| {
            CliError::io(format!(
                "Failed to read configuration {}: {e}",
                self.config.display()
            ))
        })?;

        let mut issues = Vec::new();
        let mut columns = 0;
        match parse_document(&content) {
            Err(e) => issues.push(ValidationMessage::error(e.to_string())),
            Ok(document) => match import_document(&document) {
                Err(e) => issues.push(ValidationMessage::error(e.to_string())),
                Ok(fragment) => {
                    columns = fragment.columns.len();
                    issues.extend(check_document(&document, &fragment));
                }
            },
        }

        let response = ValidationResponse {
            valid: !issues.iter().any(ValidationMessage::is_error),
            columns,
            issues,
        };

        if self.json {
            print_json(&response)?;
        } else {
            if response.valid {
                println!("✓ Validation passed ({} columns)", response.columns);
            } else {
                println!("✗ Validation failed");
            }

            if !response.issues.is_empty() {
                println!("\nIssues:");
                for msg in &response.issues {
                    let prefix = if msg.is_error() { "  ✗" } else { "  ⚠" };
                    println!("{} {}", prefix, msg.message);
                }
            }
        }

        if !response.valid {
            return Err(CliError::validation("Validation failed"));
        }

        if self.strict && !response.issues.is_empty() {
            return Err(CliError::validation("Warnings found in strict mode"));
        }

        Ok(())
    }
}

/// Collects warnings for a document that imported successfully.
pub(crate) fn check_document(
    document: &ConfigDocument,
    fragment: &LayoutFragment,
) -> Vec<ValidationMessage> {
    let mut warnings = Vec::new();
    let known: HashSet<&str> = document.order.iter().map(String::as_str).collect();

    // Duplicate entries in order
    let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
    for key in &document.order {
        *counts.entry(key.as_str()).or_default() += 1;
    }
    for (key, count) in counts.iter().filter(|(_, count)| **count > 1) {
        warnings.push(ValidationMessage::warning(format!(
            "Key '{key}' appears {count} times in order"
        )));
    }

    // Names: empty, drifted from their key, or colliding after transliteration
    let mut derived_owner: HashMap<String, &str> = HashMap::new();
    for key in known_in_order(&document.order) {
        let Some(name) = document.columns.get(key) else {
            continue;
        };
        if name.trim().is_empty() {
            warnings.push(ValidationMessage::warning(format!(
                "Column '{key}' has no display name"
            )));
            continue;
        }

        let derived = to_snake_case(name);
        if derived != key {
            warnings.push(ValidationMessage::warning(format!(
                "Key '{key}' does not match its name '{name}'; it would export as '{derived}'"
            )));
        }
        if let Some(other) = derived_owner.get(&derived) {
            warnings.push(ValidationMessage::warning(format!(
                "Columns '{}' and '{name}' both map to key '{derived}'; \
                 export rejects this unless key_collisions = \"suffix\"",
                document.columns.get(*other).map_or(*other, String::as_str)
            )));
        } else {
            derived_owner.insert(derived, key);
        }
    }

    // Entries that import ignores
    for key in document.columns.keys() {
        if !known.contains(key.as_str()) {
            warnings.push(ValidationMessage::warning(format!(
                "Column entry '{key}' is not listed in order and will be ignored"
            )));
        }
    }

    for (list, keys) in [
        ("numeric", &document.cleaning.numeric),
        ("date", &document.cleaning.date),
        ("dropna", &document.cleaning.dropna),
    ] {
        for key in keys.iter().filter(|key| !known.contains(key.as_str())) {
            warnings.push(ValidationMessage::warning(format!(
                "cleaning.{list} references unknown key '{key}'"
            )));
        }
    }

    let numeric: HashSet<&str> = document.cleaning.numeric.iter().map(String::as_str).collect();
    for key in document.cleaning.date.iter().filter(|key| numeric.contains(key.as_str())) {
        warnings.push(ValidationMessage::warning(format!(
            "Key '{key}' is listed as both numeric and date; it imports as number"
        )));
    }

    // Geometry
    for role in PageRole::ALL {
        let Some(area) = *fragment.areas.get(role) else {
            continue;
        };
        if area.width() == 0.0 || area.height() == 0.0 {
            warnings.push(ValidationMessage::warning(format!(
                "The {role} area has zero width or height"
            )));
        }
        warnings.extend(columns_outside(document, fragment, role, area));
    }

    let positions: Vec<f64> = fragment
        .columns
        .iter()
        .map(|column| column.position_for(PageRole::Default))
        .collect();
    if positions.windows(2).any(|pair| pair[0] > pair[1]) {
        warnings.push(ValidationMessage::warning(
            "Columns are not in left-to-right order; normalize will reorder them",
        ));
    }

    warnings
}

fn known_in_order(order: &[String]) -> impl Iterator<Item = &str> {
    let mut seen = HashSet::new();
    order
        .iter()
        .map(String::as_str)
        .filter(move |key| seen.insert(*key))
}

fn columns_outside(
    document: &ConfigDocument,
    fragment: &LayoutFragment,
    role: PageRole,
    area: Area,
) -> Vec<ValidationMessage> {
    fragment
        .columns
        .iter()
        .zip(&document.order)
        .filter(|(column, _)| !area.contains_x(column.position_for(role)))
        .map(|(column, key)| {
            ValidationMessage::warning(format!(
                "Column '{key}' boundary x={} lies outside the {role} area ({}..{})",
                column.position_for(role),
                area.x1(),
                area.x2()
            ))
        })
        .collect()
}
