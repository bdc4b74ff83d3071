//! Configuration document file I/O.
//!
//! Centralizes reading and writing `.json` configuration documents so the
//! CLI and any interactive shell share the same error messages and the same
//! atomic write behavior.

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

use crate::constants::DEFAULT_DOCUMENT_FILENAME;
use crate::parser::codec::{
    export_document_with, import_document, parse_document, ExportOptions,
};
use crate::parser::document::ConfigDocument;
use crate::services::store::{LayoutFragment, LayoutState};

/// Service for loading and saving configuration documents.
pub struct DocumentService;

impl DocumentService {
    /// Reads and parses a configuration document.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use std::path::Path;
    /// use tablecrop::services::DocumentService;
    ///
    /// let document = DocumentService::load(Path::new("config.json"))?;
    /// println!("{} columns", document.order.len());
    /// # Ok::<(), anyhow::Error>(())
    /// ```
    pub fn load(path: &Path) -> Result<ConfigDocument> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read configuration from {}", path.display()))?;
        parse_document(&content)
            .with_context(|| format!("Failed to parse configuration from {}", path.display()))
    }

    /// Reads a document and imports it into store content.
    pub fn load_fragment(path: &Path) -> Result<LayoutFragment> {
        let document = Self::load(path)?;
        import_document(&document)
            .with_context(|| format!("Failed to import configuration from {}", path.display()))
    }

    /// Writes a document as pretty-printed JSON.
    ///
    /// Uses a temp file + rename so a failed write never leaves a truncated
    /// document behind.
    pub fn save(document: &ConfigDocument, path: &Path) -> Result<()> {
        let content = document
            .to_json_pretty()
            .context("Failed to serialize configuration")?;

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create directory {}", parent.display())
            })?;
        }

        let temp_path = path.with_extension("json.tmp");
        fs::write(&temp_path, content).with_context(|| {
            format!("Failed to write temporary file {}", temp_path.display())
        })?;
        fs::rename(&temp_path, path).with_context(|| {
            format!("Failed to save configuration to {}", path.display())
        })?;

        Ok(())
    }

    /// Exports layout state and saves it.
    pub fn export(state: &LayoutState, options: &ExportOptions, path: &Path) -> Result<()> {
        let document = export_document_with(state, options).context("Failed to export layout")?;
        Self::save(&document, path)
    }

    /// Suggested path for a new document inside `dir`.
    #[must_use]
    pub fn default_path(dir: &Path) -> PathBuf {
        dir.join(DEFAULT_DOCUMENT_FILENAME)
    }
}
