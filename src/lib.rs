//! TableCrop Library
//!
//! This library provides the core of a bank-statement table extraction
//! configurator: page geometry, the editable layout store, and conversion to
//! and from the JSON configuration consumed by the extraction pipeline.

// Module declarations
pub mod cli;
pub mod config;
pub mod constants;
pub mod models;
pub mod parser;
pub mod services;
