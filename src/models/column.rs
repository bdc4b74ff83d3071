//! Table column definitions.

use crate::models::{PageRole, RoleMap};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Value type the extraction pipeline should coerce a column to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DataType {
    /// Free text (the document's implicit default)
    #[default]
    String,
    /// Amounts and balances
    Number,
    /// Transaction and posting dates
    Date,
}

impl DataType {
    /// Lowercase name used on the command line and in output.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            DataType::String => "string",
            DataType::Number => "number",
            DataType::Date => "date",
        }
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DataType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "string" | "text" => Ok(DataType::String),
            "number" | "numeric" => Ok(DataType::Number),
            "date" => Ok(DataType::Date),
            other => Err(format!(
                "Unknown data type '{other}'. Must be 'string', 'number', or 'date'"
            )),
        }
    }
}

/// A column of the transaction table.
///
/// `position` holds the x-coordinate of the column's left boundary, tracked
/// separately for each page role because boundaries can shift between the
/// first page and the rest of the statement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Column {
    /// Display name (e.g., "Transaction Date")
    pub name: String,
    /// Coercion type
    pub data_type: DataType,
    /// Left boundary per page role
    pub position: RoleMap<f64>,
}

impl Column {
    /// Creates a column whose boundary is the same for both page roles.
    pub fn new(name: impl Into<String>, data_type: DataType, position: f64) -> Self {
        Self {
            name: name.into(),
            data_type,
            position: RoleMap::splat(position),
        }
    }

    /// Sets a separate boundary for one role.
    #[must_use]
    pub fn with_position(mut self, role: PageRole, position: f64) -> Self {
        self.position.set(role, position);
        self
    }

    /// Boundary for a role.
    #[must_use]
    pub fn position_for(&self, role: PageRole) -> f64 {
        *self.position.get(role)
    }
}
