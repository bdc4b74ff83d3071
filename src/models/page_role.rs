//! Page roles and per-role storage.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Which layout a page uses.
///
/// Statements often print a different header block on the first page, so the
/// first page may carry its own layout. Every other page uses `Default`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PageRole {
    /// Layout for every page except an optionally customized first page
    #[default]
    Default,
    /// Layout for page 1
    First,
}

impl PageRole {
    /// Both roles, in document order.
    pub const ALL: [PageRole; 2] = [PageRole::Default, PageRole::First];

    /// Returns the opposite role.
    #[must_use]
    pub const fn other(self) -> Self {
        match self {
            PageRole::Default => PageRole::First,
            PageRole::First => PageRole::Default,
        }
    }

    /// Returns the role whose layout applies to a 1-based page number.
    #[must_use]
    pub const fn for_page(page_number: u32) -> Self {
        if page_number <= 1 {
            PageRole::First
        } else {
            PageRole::Default
        }
    }

    /// Key used for this role in the interchange document.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            PageRole::Default => "default",
            PageRole::First => "first",
        }
    }
}

impl fmt::Display for PageRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One value per [`PageRole`].
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct RoleMap<T> {
    /// Value for [`PageRole::Default`]
    pub default: T,
    /// Value for [`PageRole::First`]
    pub first: T,
}

impl<T> RoleMap<T> {
    /// Creates a map from explicit values.
    pub const fn new(default: T, first: T) -> Self {
        Self { default, first }
    }

    /// Borrows the value for a role.
    pub const fn get(&self, role: PageRole) -> &T {
        match role {
            PageRole::Default => &self.default,
            PageRole::First => &self.first,
        }
    }

    /// Mutably borrows the value for a role.
    pub fn get_mut(&mut self, role: PageRole) -> &mut T {
        match role {
            PageRole::Default => &mut self.default,
            PageRole::First => &mut self.first,
        }
    }

    /// Replaces the value for a role.
    pub fn set(&mut self, role: PageRole, value: T) {
        *self.get_mut(role) = value;
    }
}

impl<T: Clone> RoleMap<T> {
    /// Creates a map holding the same value for both roles.
    pub fn splat(value: T) -> Self {
        Self {
            default: value.clone(),
            first: value,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_other_role() {
        assert_eq!(PageRole::Default.other(), PageRole::First);
        assert_eq!(PageRole::First.other(), PageRole::Default);
    }

    #[test]
    fn test_for_page() {
        assert_eq!(PageRole::for_page(1), PageRole::First);
        assert_eq!(PageRole::for_page(2), PageRole::Default);
        assert_eq!(PageRole::for_page(40), PageRole::Default);
    }

    #[test]
    fn test_role_map_access() {
        let mut map = RoleMap::splat(5.0);
        map.set(PageRole::First, 48.0);
        assert_eq!(*map.get(PageRole::Default), 5.0);
        assert_eq!(*map.get(PageRole::First), 48.0);
    }

    #[test]
    fn test_role_serde_names() {
        assert_eq!(serde_json::to_string(&PageRole::First).unwrap(), "\"first\"");
        assert_eq!(PageRole::Default.to_string(), "default");
    }
}
