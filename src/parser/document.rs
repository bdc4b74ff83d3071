//! Serde shape of the configuration document.
//!
//! This is the JSON consumed by the downstream extraction pipeline:
//!
//! ```json
//! {
//!   "$schema": "https://...",
//!   "layout": {
//!     "default": { "area": [y1, x1, y2, x2], "columns": [x0, x1] },
//!     "first":   { "area": [y1, x1, y2, x2], "columns": [x0, x1] }
//!   },
//!   "columns": { "date": "Date", "amount": "Amount" },
//!   "order": ["date", "amount"],
//!   "cleaning": {
//!     "numeric": ["amount"],
//!     "date": ["date"],
//!     "date_format": "%y/%m/%d",
//!     "trans_detail": "",
//!     "dropna": []
//!   }
//! }
//! ```
//!
//! `area` is row-major (`[top, left, bottom, right]`) and every
//! `layout.<role>.columns` array is parallel to `order`.

use std::fmt;
use std::ops::Index;

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::constants::{DEFAULT_DATE_FORMAT, SCHEMA_URL};

/// A page coordinate as stored in the document.
///
/// Integral values are written as JSON integers (`200`, not `200.0`);
/// anything is accepted on read.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Coord(pub f64);

// Largest magnitude an f64 holds with integer precision (2^53).
const MAX_EXACT_INTEGER: f64 = 9_007_199_254_740_992.0;

impl Serialize for Coord {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let value = self.0;
        if value.is_finite() && value.fract() == 0.0 && value.abs() <= MAX_EXACT_INTEGER {
            serializer.serialize_i64(value as i64)
        } else {
            serializer.serialize_f64(value)
        }
    }
}

impl<'de> Deserialize<'de> for Coord {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        f64::deserialize(deserializer).map(Coord)
    }
}

impl From<f64> for Coord {
    fn from(value: f64) -> Self {
        Coord(value)
    }
}

/// The `columns` object: key to display name, in document order.
///
/// Entries keep the order they were inserted or read in, so export writes
/// them in `order` sequence. A repeated key replaces the earlier name in
/// place.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ColumnNames {
    entries: Vec<(String, String)>,
}

impl ColumnNames {
    /// Creates an empty map.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the display name for `key`, keeping its position if present.
    pub fn insert(&mut self, key: impl Into<String>, name: impl Into<String>) {
        let key = key.into();
        let name = name.into();
        match self.entries.iter_mut().find(|(existing, _)| *existing == key) {
            Some(entry) => entry.1 = name,
            None => self.entries.push((key, name)),
        }
    }

    /// Display name for `key`.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&String> {
        self.entries
            .iter()
            .find(|(existing, _)| existing == key)
            .map(|(_, name)| name)
    }

    /// Keys in document order.
    pub fn keys(&self) -> impl Iterator<Item = &String> {
        self.entries.iter().map(|(key, _)| key)
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the map has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromIterator<(String, String)> for ColumnNames {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        let mut names = Self::new();
        for (key, name) in iter {
            names.insert(key, name);
        }
        names
    }
}

impl Index<&str> for ColumnNames {
    type Output = String;

    fn index(&self, key: &str) -> &String {
        self.get(key).unwrap_or_else(|| panic!("no column named '{key}'"))
    }
}

impl Serialize for ColumnNames {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, name) in &self.entries {
            map.serialize_entry(key, name)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for ColumnNames {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct ColumnNamesVisitor;

        impl<'de> Visitor<'de> for ColumnNamesVisitor {
            type Value = ColumnNames;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("an object mapping column keys to display names")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<ColumnNames, A::Error> {
                let mut names = ColumnNames::new();
                while let Some((key, name)) = access.next_entry::<String, String>()? {
                    names.insert(key, name);
                }
                Ok(names)
            }
        }

        deserializer.deserialize_map(ColumnNamesVisitor)
    }
}

/// Area and column boundaries for one page role.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayoutSection {
    /// `[y1, x1, y2, x2]`
    pub area: [Coord; 4],
    /// Column boundaries, parallel to [`ConfigDocument::order`]
    #[serde(default)]
    pub columns: Vec<Coord>,
}

impl LayoutSection {
    /// Area values as plain floats.
    #[must_use]
    pub fn area_values(&self) -> [f64; 4] {
        self.area.map(|c| c.0)
    }

    /// Column boundaries as plain floats.
    #[must_use]
    pub fn column_values(&self) -> Vec<f64> {
        self.columns.iter().map(|c| c.0).collect()
    }
}

/// Layout sections keyed by page role.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayoutSections {
    /// Layout for every page without a dedicated one
    pub default: LayoutSection,
    /// Layout for page 1; single-layout documents omit it
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first: Option<LayoutSection>,
}

/// The `cleaning` block.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CleaningSection {
    /// Keys of number-typed columns
    #[serde(default)]
    pub numeric: Vec<String>,
    /// Keys of date-typed columns
    #[serde(default)]
    pub date: Vec<String>,
    /// strftime-style date pattern
    #[serde(default = "default_date_format")]
    pub date_format: String,
    /// Transaction-detail placement
    #[serde(default)]
    pub trans_detail: String,
    /// Keys of columns whose empty rows are dropped
    #[serde(default)]
    pub dropna: Vec<String>,
}

impl Default for CleaningSection {
    fn default() -> Self {
        Self {
            numeric: Vec::new(),
            date: Vec::new(),
            date_format: default_date_format(),
            trans_detail: String::new(),
            dropna: Vec::new(),
        }
    }
}

fn default_date_format() -> String {
    DEFAULT_DATE_FORMAT.to_string()
}

fn default_schema() -> String {
    SCHEMA_URL.to_string()
}

/// A complete configuration document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConfigDocument {
    /// Constant schema URL
    #[serde(rename = "$schema", default = "default_schema")]
    pub schema: String,
    /// Per-role layout sections
    pub layout: LayoutSections,
    /// Key to display name, in export order
    pub columns: ColumnNames,
    /// Authoritative column sequence
    pub order: Vec<String>,
    /// Cleaning options
    #[serde(default)]
    pub cleaning: CleaningSection,
}

impl ConfigDocument {
    /// Renders the document as pretty-printed JSON with a trailing newline.
    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        let mut json = serde_json::to_string_pretty(self)?;
        json.push('\n');
        Ok(json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_coord_integral_values_serialize_as_integers() {
        let coords = [Coord(0.0), Coord(200.0), Coord(-3.0), Coord(1.5)];
        let value = serde_json::to_value(coords).unwrap();
        assert_eq!(value, json!([0, 200, -3, 1.5]));
    }

    #[test]
    fn test_column_names_keep_document_order() {
        let names: ColumnNames =
            serde_json::from_str(r#"{"date": "Date", "amount": "Amount", "balance": "Balance"}"#)
                .unwrap();
        assert_eq!(names.keys().collect::<Vec<_>>(), ["date", "amount", "balance"]);
        assert_eq!(
            serde_json::to_string(&names).unwrap(),
            r#"{"date":"Date","amount":"Amount","balance":"Balance"}"#
        );
    }

    #[test]
    fn test_column_names_repeated_key_replaces_in_place() {
        let names: ColumnNames =
            serde_json::from_str(r#"{"date": "Date", "amount": "Amount", "date": "Posted"}"#)
                .unwrap();
        assert_eq!(names.len(), 2);
        assert_eq!(names["date"], "Posted");
        assert_eq!(names.keys().next().map(String::as_str), Some("date"));
        assert!(names.get("balance").is_none());
    }

    #[test]
    fn test_coord_reads_integers_and_floats() {
        let coords: Vec<Coord> = serde_json::from_str("[5, 48.25]").unwrap();
        assert_eq!(coords, vec![Coord(5.0), Coord(48.25)]);
    }

    #[test]
    fn test_minimal_document_fills_defaults() {
        let doc: ConfigDocument = serde_json::from_value(json!({
            "layout": { "default": { "area": [0, 0, 200, 100], "columns": [] } },
            "columns": {},
            "order": []
        }))
        .unwrap();

        assert_eq!(doc.schema, SCHEMA_URL);
        assert!(doc.layout.first.is_none());
        assert_eq!(doc.cleaning, CleaningSection::default());
        assert_eq!(doc.cleaning.date_format, "%y/%m/%d");
    }

    #[test]
    fn test_missing_required_keys_fail() {
        let result: Result<ConfigDocument, _> = serde_json::from_value(json!({
            "layout": { "default": { "area": [0, 0, 200, 100] } },
            "columns": {}
        }));
        assert!(result.is_err());

        let short_area: Result<ConfigDocument, _> = serde_json::from_value(json!({
            "layout": { "default": { "area": [0, 0, 200] } },
            "columns": {},
            "order": []
        }));
        assert!(short_area.is_err());
    }

    #[test]
    fn test_schema_key_and_optional_first() {
        let doc = ConfigDocument {
            schema: SCHEMA_URL.to_string(),
            layout: LayoutSections {
                default: LayoutSection {
                    area: [Coord(0.0), Coord(0.0), Coord(200.0), Coord(100.0)],
                    columns: vec![],
                },
                first: None,
            },
            columns: ColumnNames::new(),
            order: vec![],
            cleaning: CleaningSection::default(),
        };
        let value = serde_json::to_value(&doc).unwrap();
        assert_eq!(value["$schema"], json!(SCHEMA_URL));
        assert!(value["layout"].get("first").is_none());
        assert!(doc.to_json_pretty().unwrap().ends_with("}\n"));
    }
}
