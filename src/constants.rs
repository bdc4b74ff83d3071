//! Application-wide constants.
//!
//! This module defines constants used throughout the application,
//! including the application name and interchange document defaults.

/// The display name of the application (human-readable, with proper capitalization).
pub const APP_NAME: &str = "TableCrop";

/// The binary name of the application (used in command examples, lowercase with hyphens).
pub const APP_BINARY_NAME: &str = "tablecrop";

/// Fixed `$schema` URL written into every configuration document.
pub const SCHEMA_URL: &str =
    "https://raw.githubusercontent.com/tablecrop/tablecrop/main/schema/statement-config.schema.json";

/// Date format applied when a document omits `cleaning.date_format`.
pub const DEFAULT_DATE_FORMAT: &str = "%y/%m/%d";

/// Filename suggested when saving a new configuration document.
pub const DEFAULT_DOCUMENT_FILENAME: &str = "config.json";

/// Environment variable that overrides the configuration directory.
pub const CONFIG_DIR_ENV: &str = "TABLECROP_CONFIG_DIR";
