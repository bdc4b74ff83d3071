//! Conversion between layout state and the configuration document.
//!
//! Export sorts columns by their default-page boundary, rounds every
//! coordinate, and assigns each column a snake_case key. Import walks the
//! document's `order` array to rebuild the column list.

use std::collections::{BTreeSet, HashMap, HashSet};
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

use crate::constants::SCHEMA_URL;
use crate::models::{Area, CleaningOptions, Column, DataType, PageRole, RoleMap};
use crate::parser::document::{
    CleaningSection, ConfigDocument, Coord, LayoutSection, LayoutSections,
};
use crate::parser::keys::{from_snake_case, to_snake_case};
use crate::services::store::{LayoutFragment, LayoutState};

/// Errors raised while converting to or from a configuration document.
#[derive(Debug, Error)]
pub enum CodecError {
    /// Export needs an area for both page roles.
    #[error("No area defined for the {0} page; select both areas before exporting")]
    MissingArea(PageRole),

    /// Two display names transliterate to the same key.
    #[error("Columns '{first}' and '{second}' both map to key '{key}'")]
    DuplicateKey {
        /// Shared key
        key: String,
        /// Name of the column that claimed the key first
        first: String,
        /// Name of the column that collided with it
        second: String,
    },

    /// An area edge or column boundary is NaN or infinite.
    #[error("The {role} layout has a non-finite coordinate ({value}); coordinates must be finite")]
    NonFinite {
        /// Layout holding the coordinate
        role: PageRole,
        /// Offending value
        value: f64,
    },

    /// The document is not valid JSON or lacks required fields.
    #[error("Malformed configuration document: {0}")]
    Malformed(#[from] serde_json::Error),

    /// `order` names a key missing from `columns`.
    #[error("Key '{0}' is listed in order but has no entry in columns")]
    UnknownColumn(String),

    /// A `layout.<role>.columns` array is not parallel to `order`.
    #[error("layout.{role}.columns has {found} entries but order has {expected}")]
    ColumnCountMismatch {
        /// Offending layout section
        role: PageRole,
        /// Length of `order`
        expected: usize,
        /// Length of the section's `columns`
        found: usize,
    },
}

/// How export handles two columns whose names share a key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum KeyCollisionPolicy {
    /// Fail with [`CodecError::DuplicateKey`]
    #[default]
    Reject,
    /// Keep the first key and give later columns `_2`, `_3`, ... suffixes
    Suffix,
}

impl KeyCollisionPolicy {
    /// Lowercase name used in config files and on the command line.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            KeyCollisionPolicy::Reject => "reject",
            KeyCollisionPolicy::Suffix => "suffix",
        }
    }
}

impl fmt::Display for KeyCollisionPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for KeyCollisionPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "reject" => Ok(KeyCollisionPolicy::Reject),
            "suffix" => Ok(KeyCollisionPolicy::Suffix),
            other => Err(format!(
                "Unknown key collision policy '{other}'. Must be 'reject' or 'suffix'"
            )),
        }
    }
}

/// Export settings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExportOptions {
    /// Collision handling for derived keys
    pub key_collisions: KeyCollisionPolicy,
}

/// Exports layout state with default options.
///
/// # Errors
///
/// Returns [`CodecError::MissingArea`] unless both page roles have an area,
/// [`CodecError::NonFinite`] when a coordinate is NaN or infinite, and
/// [`CodecError::DuplicateKey`] when two column names share a key.
pub fn export_document(state: &LayoutState) -> Result<ConfigDocument, CodecError> {
    export_document_with(state, &ExportOptions::default())
}

/// Exports layout state into a configuration document.
///
/// # Errors
///
/// See [`export_document`]. Under [`KeyCollisionPolicy::Suffix`] collisions
/// never fail.
pub fn export_document_with(
    state: &LayoutState,
    options: &ExportOptions,
) -> Result<ConfigDocument, CodecError> {
    let default_area = state
        .area(PageRole::Default)
        .ok_or(CodecError::MissingArea(PageRole::Default))?;
    let first_area = state
        .area(PageRole::First)
        .ok_or(CodecError::MissingArea(PageRole::First))?;

    // Store order reflects on-screen drag order only; the document is
    // ordered left to right. sort_by is stable so ties keep store order.
    let mut sorted: Vec<&Column> = state.columns.iter().collect();
    sorted.sort_by(|a, b| a.position.default.total_cmp(&b.position.default));

    check_finite(PageRole::Default, default_area, &sorted)?;
    check_finite(PageRole::First, first_area, &sorted)?;

    let keys = assign_keys(&sorted, options.key_collisions)?;

    let keys_of_type = |data_type: DataType| -> Vec<String> {
        sorted
            .iter()
            .zip(&keys)
            .filter(|(column, _)| column.data_type == data_type)
            .map(|(_, key)| key.clone())
            .collect()
    };

    let section = |area: Area, role: PageRole| LayoutSection {
        area: area.rounded().to_row_major().map(Coord),
        columns: sorted
            .iter()
            .map(|column| Coord(column.position_for(role).round()))
            .collect(),
    };

    let document = ConfigDocument {
        schema: SCHEMA_URL.to_string(),
        layout: LayoutSections {
            default: section(default_area, PageRole::Default),
            first: Some(section(first_area, PageRole::First)),
        },
        columns: keys
            .iter()
            .zip(&sorted)
            .map(|(key, column)| (key.clone(), column.name.clone()))
            .collect(),
        order: keys.clone(),
        cleaning: CleaningSection {
            numeric: keys_of_type(DataType::Number),
            date: keys_of_type(DataType::Date),
            date_format: state.cleaning.date_format.clone(),
            trans_detail: state.cleaning.trans_detail.clone(),
            dropna: dropna_keys(&state.cleaning.drop_empty_columns, &sorted, &keys),
        },
    };

    debug!(
        "Exported {} columns ({} numeric, {} date)",
        document.order.len(),
        document.cleaning.numeric.len(),
        document.cleaning.date.len()
    );
    Ok(document)
}

// JSON has no NaN or infinity; serde_json would write them as null.
fn check_finite(role: PageRole, area: Area, columns: &[&Column]) -> Result<(), CodecError> {
    let mut coordinates = area
        .to_row_major()
        .into_iter()
        .chain(columns.iter().map(|column| column.position_for(role)));
    match coordinates.find(|value| !value.is_finite()) {
        Some(value) => Err(CodecError::NonFinite { role, value }),
        None => Ok(()),
    }
}

/// Derives one unique key per column, in the given order.
fn assign_keys(
    columns: &[&Column],
    policy: KeyCollisionPolicy,
) -> Result<Vec<String>, CodecError> {
    let mut owners: HashMap<String, &str> = HashMap::with_capacity(columns.len());
    let mut keys = Vec::with_capacity(columns.len());

    for column in columns {
        let base = to_snake_case(&column.name);
        let key = match (owners.get(base.as_str()), policy) {
            (None, _) => base,
            (Some(first), KeyCollisionPolicy::Reject) => {
                return Err(CodecError::DuplicateKey {
                    key: base,
                    first: (*first).to_string(),
                    second: column.name.clone(),
                });
            }
            (Some(_), KeyCollisionPolicy::Suffix) => {
                let key = (2..)
                    .map(|n| format!("{base}_{n}"))
                    .find(|candidate| !owners.contains_key(candidate))
                    .unwrap_or(base);
                warn!("Column '{}' renamed to key '{}' to avoid a collision", column.name, key);
                key
            }
        };
        owners.insert(key.clone(), &column.name);
        keys.push(key);
    }

    Ok(keys)
}

/// Maps drop-empty display names to document keys.
///
/// A name that matches a column uses that column's (possibly suffixed) key;
/// otherwise it is transliterated directly.
fn dropna_keys(names: &BTreeSet<String>, columns: &[&Column], keys: &[String]) -> Vec<String> {
    let mut seen = HashSet::new();
    names
        .iter()
        .map(|name| {
            columns
                .iter()
                .position(|column| &column.name == name)
                .map_or_else(|| to_snake_case(name), |index| keys[index].clone())
        })
        .filter(|key| seen.insert(key.clone()))
        .collect()
}

/// Parses configuration JSON.
///
/// # Errors
///
/// Returns [`CodecError::Malformed`] for invalid JSON or missing required keys.
pub fn parse_document(json: &str) -> Result<ConfigDocument, CodecError> {
    Ok(serde_json::from_str(json)?)
}

/// Rebuilds store content from a configuration document.
///
/// Import is all-or-nothing: any structural problem fails the whole call.
///
/// # Errors
///
/// Returns [`CodecError::ColumnCountMismatch`] when a layout section is not
/// parallel to `order`, and [`CodecError::UnknownColumn`] when `order` names
/// a key missing from `columns`.
pub fn import_document(document: &ConfigDocument) -> Result<LayoutFragment, CodecError> {
    let expected = document.order.len();
    check_parallel(&document.layout.default, PageRole::Default, expected)?;
    if let Some(first) = &document.layout.first {
        check_parallel(first, PageRole::First, expected)?;
    }

    let default_area = Area::from_row_major(document.layout.default.area_values());
    let first_area = document
        .layout
        .first
        .as_ref()
        .map_or(default_area, |section| Area::from_row_major(section.area_values()));

    let numeric: HashSet<&str> = document.cleaning.numeric.iter().map(String::as_str).collect();
    let date: HashSet<&str> = document.cleaning.date.iter().map(String::as_str).collect();

    let columns = document
        .order
        .iter()
        .enumerate()
        .map(|(index, key)| {
            let name = document
                .columns
                .get(key)
                .ok_or_else(|| CodecError::UnknownColumn(key.clone()))?;

            let data_type = if numeric.contains(key.as_str()) {
                DataType::Number
            } else if date.contains(key.as_str()) {
                DataType::Date
            } else {
                DataType::String
            };

            let default_position = document.layout.default.columns[index].0;
            let first_position = document
                .layout
                .first
                .as_ref()
                .map_or(default_position, |section| section.columns[index].0);

            Ok(Column {
                name: name.clone(),
                data_type,
                position: RoleMap::new(default_position, first_position),
            })
        })
        .collect::<Result<Vec<_>, CodecError>>()?;

    let cleaning = CleaningOptions {
        date_format: document.cleaning.date_format.clone(),
        trans_detail: document.cleaning.trans_detail.clone(),
        drop_empty_columns: document
            .cleaning
            .dropna
            .iter()
            .map(|key| from_snake_case(key))
            .collect(),
    };

    debug!(
        "Imported {} columns (first-page layout: {})",
        columns.len(),
        if document.layout.first.is_some() { "yes" } else { "no" }
    );

    Ok(LayoutFragment {
        areas: RoleMap::new(Some(default_area), Some(first_area)),
        columns,
        cleaning,
    })
}

fn check_parallel(
    section: &LayoutSection,
    role: PageRole,
    expected: usize,
) -> Result<(), CodecError> {
    let found = section.columns.len();
    if found == expected {
        Ok(())
    } else {
        Err(CodecError::ColumnCountMismatch {
            role,
            expected,
            found,
        })
    }
}

/// Parses and imports configuration JSON in one step.
///
/// # Errors
///
/// Any error from [`parse_document`] or [`import_document`].
pub fn import_json(json: &str) -> Result<LayoutFragment, CodecError> {
    import_document(&parse_document(json)?)
}
