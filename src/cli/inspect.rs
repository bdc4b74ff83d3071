//! Inspect command for configuration documents.

use crate::cli::common::{print_json, CliError, CliResult};
use crate::models::{Area, PageRole};
use crate::parser::import_document;
use crate::services::DocumentService;
use clap::Args;
use serde::Serialize;
use std::path::PathBuf;

/// Show the areas, columns, and cleaning options of a configuration
#[derive(Debug, Clone, Args)]
pub struct InspectArgs {
    /// Path to configuration JSON file
    #[arg(short, long, value_name = "FILE")]
    pub config: PathBuf,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Serialize)]
struct InspectOutput {
    areas: AreasOutput,
    columns: Vec<ColumnOutput>,
    cleaning: CleaningOutput,
}

#[derive(Debug, Serialize)]
struct AreasOutput {
    default: Option<AreaOutput>,
    first: Option<AreaOutput>,
}

#[derive(Debug, Serialize)]
struct AreaOutput {
    x1: f64,
    y1: f64,
    x2: f64,
    y2: f64,
    width: f64,
    height: f64,
}

impl From<Area> for AreaOutput {
    fn from(area: Area) -> Self {
        Self {
            x1: area.x1(),
            y1: area.y1(),
            x2: area.x2(),
            y2: area.y2(),
            width: area.width(),
            height: area.height(),
        }
    }
}

#[derive(Debug, Serialize)]
struct ColumnOutput {
    index: usize,
    key: String,
    name: String,
    #[serde(rename = "type")]
    data_type: String,
    default_position: f64,
    first_position: f64,
}

#[derive(Debug, Serialize)]
struct CleaningOutput {
    date_format: String,
    trans_detail: String,
    drop_empty: Vec<String>,
}

impl InspectArgs {
    /// Execute the inspect command
    pub fn execute(&self) -> CliResult<()> {
        let document = DocumentService::load(&self.config)
            .map_err(|e| CliError::io(format!("Failed to load configuration: {e:#}")))?;
        let fragment = import_document(&document)
            .map_err(|e| CliError::validation(format!("Invalid configuration: {e}")))?;

        let output = InspectOutput {
            areas: AreasOutput {
                default: fragment.areas.default.map(AreaOutput::from),
                first: fragment.areas.first.map(AreaOutput::from),
            },
            columns: fragment
                .columns
                .iter()
                .zip(&document.order)
                .enumerate()
                .map(|(index, (column, key))| ColumnOutput {
                    index,
                    key: key.clone(),
                    name: column.name.clone(),
                    data_type: column.data_type.to_string(),
                    default_position: column.position_for(PageRole::Default),
                    first_position: column.position_for(PageRole::First),
                })
                .collect(),
            cleaning: CleaningOutput {
                date_format: fragment.cleaning.date_format.clone(),
                trans_detail: fragment.cleaning.trans_detail.clone(),
                drop_empty: fragment.cleaning.drop_empty_columns.iter().cloned().collect(),
            },
        };

        if self.json {
            print_json(&output)
        } else {
            print_human(&self.config, &output);
            Ok(())
        }
    }
}

fn print_human(path: &std::path::Path, output: &InspectOutput) {
    println!("Configuration: {}", path.display());
    println!();

    println!("Areas (left, top) - (right, bottom):");
    for (role, area) in [
        (PageRole::Default, &output.areas.default),
        (PageRole::First, &output.areas.first),
    ] {
        match area {
            Some(a) => println!(
                "  {:<8} ({}, {}) - ({}, {})  [{} x {}]",
                format!("{role}:"),
                a.x1,
                a.y1,
                a.x2,
                a.y2,
                a.width,
                a.height
            ),
            None => println!("  {:<8} (not set)", format!("{role}:")),
        }
    }
    println!();

    println!("Columns ({}):", output.columns.len());
    if output.columns.is_empty() {
        println!("  (none)");
    }
    for column in &output.columns {
        let name = if column.name.is_empty() {
            "(unnamed)"
        } else {
            column.name.as_str()
        };
        println!(
            "  {:>2}. {:<24} {:<20} {:<7} default x={:<8} first x={}",
            column.index, name, column.key, column.data_type, column.default_position,
            column.first_position
        );
    }
    println!();

    println!("Cleaning:");
    println!("  Date format:        {}", output.cleaning.date_format);
    if output.cleaning.trans_detail.is_empty() {
        println!("  Transaction detail: (none)");
    } else {
        println!("  Transaction detail: {}", output.cleaning.trans_detail);
    }
    if output.cleaning.drop_empty.is_empty() {
        println!("  Drop empty rows:    (none)");
    } else {
        println!("  Drop empty rows:    {}", output.cleaning.drop_empty.join(", "));
    }
}
