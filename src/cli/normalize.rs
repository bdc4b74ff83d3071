//! Normalize command: re-export a configuration in canonical form.

use crate::cli::common::{CliError, CliResult};
use crate::config::Config;
use crate::parser::{export_document_with, import_document, KeyCollisionPolicy};
use crate::services::{DocumentService, LayoutState, LayoutStore};
use clap::Args;
use std::path::PathBuf;

/// Rewrite a configuration with sorted columns, rounded coordinates, and defaults filled in
#[derive(Debug, Clone, Args)]
pub struct NormalizeArgs {
    /// Path to configuration JSON file
    #[arg(short, long, value_name = "FILE")]
    pub config: PathBuf,

    /// Write to this file instead of stdout (may equal --config)
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// How to handle columns whose names share a key (reject or suffix)
    #[arg(long, value_name = "POLICY")]
    pub key_collisions: Option<KeyCollisionPolicy>,
}

impl NormalizeArgs {
    /// Execute the normalize command
    pub fn execute(&self) -> CliResult<()> {
        let document = DocumentService::load(&self.config)
            .map_err(|e| CliError::io(format!("Failed to load configuration: {e:#}")))?;
        let fragment = import_document(&document)
            .map_err(|e| CliError::validation(format!("Invalid configuration: {e}")))?;

        let store = LayoutStore::from_state(LayoutState::from(fragment));

        let config = Config::load().unwrap_or_else(|_| Config::default());
        let mut options = config.export_options();
        if let Some(policy) = self.key_collisions {
            options.key_collisions = policy;
        }

        let normalized = export_document_with(store.state(), &options)
            .map_err(|e| CliError::validation(e.to_string()))?;

        match &self.output {
            Some(path) => {
                DocumentService::save(&normalized, path)
                    .map_err(|e| CliError::io(format!("{e:#}")))?;
                eprintln!("✓ Normalized configuration written to {}", path.display());
            }
            None => {
                let json = normalized
                    .to_json_pretty()
                    .map_err(|e| CliError::io(format!("Failed to serialize JSON: {e}")))?;
                print!("{json}");
            }
        }

        Ok(())
    }
}
