//! Configuration management CLI commands.

use crate::cli::common::{print_json, CliError, CliResult};
use crate::config::Config;
use crate::parser::KeyCollisionPolicy;
use clap::{Args, Subcommand};
use serde::Serialize;

/// Configuration management commands
#[derive(Args, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    command: ConfigCommand,
}

#[derive(Subcommand, Debug)]
enum ConfigCommand {
    /// Display current configuration
    Show(ConfigShowArgs),
    /// Set configuration values
    Set(ConfigSetArgs),
}

/// Display current configuration
#[derive(Args, Debug)]
pub struct ConfigShowArgs {
    /// Output as JSON
    #[arg(long)]
    json: bool,
}

/// Set configuration values
#[derive(Args, Debug)]
pub struct ConfigSetArgs {
    /// Default date format for new configurations
    #[arg(long, value_name = "FORMAT")]
    date_format: Option<String>,

    /// Default transaction-detail placement for new configurations
    #[arg(long, value_name = "VALUE")]
    trans_detail: Option<String>,

    /// Key collision policy (reject or suffix)
    #[arg(long, value_name = "POLICY")]
    key_collisions: Option<String>,
}

/// JSON-serializable configuration for output
#[derive(Serialize, Debug)]
struct ConfigOutput {
    path: Option<String>,
    defaults: DefaultsOutput,
    export: ExportOutput,
    viewer: ViewerOutput,
}

#[derive(Serialize, Debug)]
struct DefaultsOutput {
    date_format: String,
    trans_detail: String,
}

#[derive(Serialize, Debug)]
struct ExportOutput {
    key_collisions: String,
}

#[derive(Serialize, Debug)]
struct ViewerOutput {
    min_scale: f64,
    max_scale: f64,
    scale_step: f64,
}

impl ConfigArgs {
    /// Execute config subcommand
    pub fn execute(&self) -> CliResult<()> {
        match &self.command {
            ConfigCommand::Show(args) => args.execute(),
            ConfigCommand::Set(args) => args.execute(),
        }
    }
}

impl ConfigShowArgs {
    /// Execute show command
    pub fn execute(&self) -> CliResult<()> {
        let config = Config::load()
            .map_err(|e| CliError::validation(format!("Failed to load configuration: {e:#}")))?;

        if self.json {
            print_json(&to_output(&config))?;
        } else {
            output_human_readable(&config);
        }

        Ok(())
    }
}

impl ConfigSetArgs {
    /// Execute set command
    pub fn execute(&self) -> CliResult<()> {
        // At least one argument must be provided
        if self.date_format.is_none()
            && self.trans_detail.is_none()
            && self.key_collisions.is_none()
        {
            return Err(CliError::validation(
                "At least one configuration option must be specified: \
                 --date-format, --trans-detail, or --key-collisions",
            ));
        }

        // Load current configuration
        let mut config = Config::load().unwrap_or_else(|_| Config::default());

        if let Some(format) = &self.date_format {
            config.defaults.date_format.clone_from(format);
        }

        if let Some(detail) = &self.trans_detail {
            config.defaults.trans_detail.clone_from(detail);
        }

        if let Some(policy) = &self.key_collisions {
            config.export.key_collisions = policy
                .parse::<KeyCollisionPolicy>()
                .map_err(CliError::validation)?;
        }

        config
            .validate()
            .map_err(|e| CliError::validation(format!("Invalid configuration: {e}")))?;
        config
            .save()
            .map_err(|e| CliError::io(format!("Failed to save configuration: {e:#}")))?;

        println!("Configuration updated successfully.");

        Ok(())
    }
}

fn to_output(config: &Config) -> ConfigOutput {
    ConfigOutput {
        path: Config::config_file_path()
            .ok()
            .map(|p| p.to_string_lossy().to_string()),
        defaults: DefaultsOutput {
            date_format: config.defaults.date_format.clone(),
            trans_detail: config.defaults.trans_detail.clone(),
        },
        export: ExportOutput {
            key_collisions: config.export.key_collisions.to_string(),
        },
        viewer: ViewerOutput {
            min_scale: config.viewer.min_scale,
            max_scale: config.viewer.max_scale,
            scale_step: config.viewer.scale_step,
        },
    }
}

/// Output configuration in human-readable format
fn output_human_readable(config: &Config) {
    println!("TableCrop Configuration");
    println!("=======================");
    println!();

    if let Ok(path) = Config::config_file_path() {
        println!("File: {}", path.display());
        println!();
    }

    println!("Defaults:");
    println!("  Date Format:        {}", config.defaults.date_format);
    if config.defaults.trans_detail.is_empty() {
        println!("  Transaction Detail: (none)");
    } else {
        println!("  Transaction Detail: {}", config.defaults.trans_detail);
    }
    println!();

    println!("Export:");
    println!("  Key Collisions: {}", config.export.key_collisions);
    println!();

    println!("Viewer:");
    println!(
        "  Zoom: {} - {} (step {})",
        config.viewer.min_scale, config.viewer.max_scale, config.viewer.scale_step
    );
    println!();
}
