//! New command: build a configuration document from the command line.

use crate::cli::common::{parse_area, parse_coordinate, CliError, CliResult};
use crate::config::Config;
use crate::models::{Area, DataType, PageRole};
use crate::parser::{export_document_with, KeyCollisionPolicy};
use crate::services::{DocumentService, LayoutStore};
use clap::Args;
use std::path::PathBuf;
use tracing::info;

/// Create a configuration from an area and column boundaries
#[derive(Debug, Clone, Args)]
pub struct NewArgs {
    /// Output file path
    #[arg(short, long, value_name = "FILE")]
    pub output: PathBuf,

    /// Table area for every page, as Y1,X1,Y2,X2
    #[arg(
        long,
        value_name = "Y1,X1,Y2,X2",
        value_parser = parse_area,
        allow_hyphen_values = true
    )]
    pub area: Area,

    /// Separate table area for page 1, as Y1,X1,Y2,X2
    #[arg(
        long,
        value_name = "Y1,X1,Y2,X2",
        value_parser = parse_area,
        allow_hyphen_values = true
    )]
    pub first_area: Option<Area>,

    /// Column boundary, as X[/FIRST_X]:NAME[:TYPE] (repeatable; TYPE is string, number, or date)
    #[arg(long = "column", value_name = "SPEC", value_parser = parse_column_spec)]
    pub columns: Vec<ColumnSpec>,

    /// Date format for date columns (defaults to the configured value)
    #[arg(long, value_name = "FORMAT")]
    pub date_format: Option<String>,

    /// Transaction-detail placement (defaults to the configured value)
    #[arg(long, value_name = "VALUE")]
    pub trans_detail: Option<String>,

    /// Drop rows where this column is empty (repeatable; display name)
    #[arg(long, value_name = "NAME")]
    pub dropna: Vec<String>,

    /// How to handle columns whose names share a key (reject or suffix)
    #[arg(long, value_name = "POLICY")]
    pub key_collisions: Option<KeyCollisionPolicy>,

    /// Overwrite the output file if it exists
    #[arg(long)]
    pub force: bool,
}

/// A column given on the command line.
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnSpec {
    /// Boundary on every page
    pub position: f64,
    /// Boundary on page 1, when it differs
    pub first_position: Option<f64>,
    /// Display name
    pub name: String,
    /// Coercion type
    pub data_type: DataType,
}

/// Parses `X[/FIRST_X]:NAME[:TYPE]`.
pub fn parse_column_spec(value: &str) -> Result<ColumnSpec, String> {
    let mut parts = value.splitn(3, ':');
    let positions = parts.next().unwrap_or_default();
    let name = parts
        .next()
        .ok_or_else(|| format!("Column '{value}' must be X:NAME or X:NAME:TYPE"))?;
    let data_type = match parts.next() {
        Some(kind) => kind.parse::<DataType>()?,
        None => DataType::String,
    };

    let parse_x = |text: &str| {
        parse_coordinate(text).map_err(|e| format!("{e} in column '{value}'"))
    };
    let (position, first_position) = match positions.split_once('/') {
        Some((default, first)) => (parse_x(default)?, Some(parse_x(first)?)),
        None => (parse_x(positions)?, None),
    };

    Ok(ColumnSpec {
        position,
        first_position,
        name: name.to_string(),
        data_type,
    })
}

impl NewArgs {
    /// Execute the new command
    pub fn execute(&self) -> CliResult<()> {
        if self.output.exists() && !self.force {
            return Err(CliError::validation(format!(
                "Output file already exists: {} (use --force to overwrite)",
                self.output.display()
            )));
        }

        let config = Config::load().unwrap_or_else(|_| Config::default());
        let mut store = LayoutStore::with_cleaning(config.cleaning_defaults());

        store.set_area(PageRole::Default, self.area);
        if let Some(first) = self.first_area {
            store.set_area(PageRole::First, first);
        }

        for spec in &self.columns {
            store.add_column(spec.position, spec.name.clone(), spec.data_type);
            if let Some(first_x) = spec.first_position {
                let index = store.columns().len() - 1;
                store.set_active_role(PageRole::First);
                store.update_column_position(index, first_x);
                store.set_active_role(PageRole::Default);
            }
        }

        if let Some(format) = &self.date_format {
            store.set_date_format(format.clone());
        }
        if let Some(detail) = &self.trans_detail {
            store.set_trans_detail(detail.clone());
        }
        for name in &self.dropna {
            store.set_drop_empty(name.clone(), true);
        }

        let mut options = config.export_options();
        if let Some(policy) = self.key_collisions {
            options.key_collisions = policy;
        }

        let document = export_document_with(store.state(), &options)
            .map_err(|e| CliError::validation(e.to_string()))?;
        DocumentService::save(&document, &self.output)
            .map_err(|e| CliError::io(format!("{e:#}")))?;

        info!("Wrote {}", self.output.display());
        println!(
            "✓ Created {} ({} columns)",
            self.output.display(),
            document.order.len()
        );
        Ok(())
    }
}
