//! Data models for page areas, columns, and cleaning options.
//!
//! This module contains all the core data structures used throughout the application.
//! Models are designed to be independent of UI and business logic.

pub mod cleaning;
pub mod column;
pub mod interaction;
pub mod page_geometry;
pub mod page_role;
pub mod viewport;

// Re-export all model types
pub use cleaning::CleaningOptions;
pub use column::{Column, DataType};
pub use interaction::InteractionMode;
pub use page_geometry::{Area, AreaEdge, Point, Rectangle};
pub use page_role::{PageRole, RoleMap};
pub use viewport::{PageSurface, Viewport, ZoomLimits};
