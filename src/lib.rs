//! Terminal user interface for educational-platform triage boards.
//!
//! Three kanban surfaces — moderation, support tickets, and content
//! improvement — share a pointer-driven drag-and-drop core, a filter
//! overlay, and a best-effort Console API sync layer.

pub mod app;
pub mod backend;
pub mod board;
pub mod config;
pub mod dnd;
pub mod error;
pub mod events;
pub mod logger;
pub mod state;
pub mod ui;
pub mod utils;
