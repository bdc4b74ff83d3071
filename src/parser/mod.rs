//! Parsing and serialization of configuration documents.
//!
//! This module maps layout state to and from the snake_case JSON document
//! consumed by the extraction pipeline.

pub mod codec;
pub mod document;
pub mod keys;

// Re-export commonly used functions
pub use codec::{
    export_document, export_document_with, import_document, import_json, parse_document,
    CodecError, ExportOptions, KeyCollisionPolicy,
};
pub use document::{ColumnNames, ConfigDocument};
