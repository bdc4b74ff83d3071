//! CLI command handlers for TableCrop.
//!
//! This module provides headless, scriptable access to the layout store and
//! configuration codec for automation, testing, and CI/CD integration.

pub mod common;
pub mod config;
pub mod inspect;
pub mod new;
pub mod normalize;
pub mod validate;

// Re-export types used by main.rs and tests
pub use common::{CliError, CliResult, ExitCode};
pub use config::ConfigArgs;
pub use inspect::InspectArgs;
pub use new::NewArgs;
pub use normalize::NormalizeArgs;
pub use validate::ValidateArgs;
