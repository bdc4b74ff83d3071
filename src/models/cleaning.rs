//! Text-cleaning options passed through to the extraction pipeline.

use crate::constants::DEFAULT_DATE_FORMAT;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Cleaning options applied after the table text is extracted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CleaningOptions {
    /// strftime-style pattern for date columns (e.g., "%d/%m/%Y")
    pub date_format: String,
    /// Where multi-line transaction details sit relative to the dated row
    /// (e.g., "below"); passed through verbatim
    pub trans_detail: String,
    /// Display names of columns whose empty rows should be dropped
    pub drop_empty_columns: BTreeSet<String>,
}

impl CleaningOptions {
    /// Marks or unmarks a column (by display name) for empty-row dropping.
    ///
    /// Returns true if the set changed.
    pub fn set_drop_empty(&mut self, name: impl Into<String>, drop: bool) -> bool {
        let name = name.into();
        if drop {
            self.drop_empty_columns.insert(name)
        } else {
            self.drop_empty_columns.remove(&name)
        }
    }

    /// Checks if a column is marked for empty-row dropping.
    #[must_use]
    pub fn drops_empty(&self, name: &str) -> bool {
        self.drop_empty_columns.contains(name)
    }
}

impl Default for CleaningOptions {
    fn default() -> Self {
        Self {
            date_format: DEFAULT_DATE_FORMAT.to_string(),
            trans_detail: String::new(),
            drop_empty_columns: BTreeSet::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cleaning = CleaningOptions::default();
        assert_eq!(cleaning.date_format, "%y/%m/%d");
        assert_eq!(cleaning.trans_detail, "");
        assert!(cleaning.drop_empty_columns.is_empty());
    }

    #[test]
    fn test_set_drop_empty() {
        let mut cleaning = CleaningOptions::default();
        assert!(cleaning.set_drop_empty("Balance", true));
        assert!(!cleaning.set_drop_empty("Balance", true));
        assert!(cleaning.drops_empty("Balance"));
        assert!(cleaning.set_drop_empty("Balance", false));
        assert!(!cleaning.drops_empty("Balance"));
    }
}
