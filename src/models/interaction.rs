//! Pointer interaction modes.

use serde::{Deserialize, Serialize};

/// What a pointer-down on the page produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InteractionMode {
    /// Drag out a new area
    #[default]
    Select,
    /// Reserved; pointer-down does nothing
    Move,
    /// Reserved; pointer-down does nothing
    Resize,
    /// Click to drop a column boundary
    InsertColumn,
}
