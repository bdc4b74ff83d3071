//! Service layer for business logic.
//!
//! Pointer geometry, the layout store, and document file I/O.

pub mod documents;
pub mod geometry;
pub mod store;

// Re-export commonly used types and functions
pub use documents::DocumentService;
pub use store::{Gesture, LayoutFragment, LayoutState, LayoutStore, StoreEvent, SubscriptionId};
