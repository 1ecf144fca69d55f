//! # Tabula Core
//!
//! Board state engine and domain models for the Tabula kanban board.
//!
//! This crate provides the normalized column/card model, the mutation
//! operations that keep it consistent, the drag-reorder tracker that turns
//! pointer events into single move operations, and JSON persistence with
//! document import/export, independent of any particular UI toolkit or
//! storage backend.

pub mod domain;
pub mod drag;
pub mod error;
pub mod storage;
pub mod store;

// Re-export commonly used types
pub use domain::{
    card::{Card, CardId, CardPatch, Priority},
    document::{Column, ColumnId, Document},
    filter::CardFilter,
};
pub use drag::{DragEvent, DragState, DragTracker, DropResolution};
pub use error::{Result, TabulaError};
pub use storage::KeyValueSlot;
pub use store::{BoardStore, StoreConfig};
