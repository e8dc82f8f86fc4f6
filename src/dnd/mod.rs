//! Drag-and-drop state machine.
//!
//! This module contains the pointer-driven reordering core shared by every
//! board, independent of how the board is rendered:
//! - Droppable regions and the per-render registry
//! - Collision detection resolving the current drop target
//! - The drag lifecycle controller mutating the board store

mod collision;
mod controller;
mod droppable;
mod geometry;

pub use collision::CollisionState;
pub use controller::{DragController, DragOutcome};
pub use droppable::{DragId, Droppable, DropTarget, DroppableMap};
