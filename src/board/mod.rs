//! Board data module.
//!
//! This module contains the board domain model and its store, including:
//! - Entity types (Column, Task, User, etc.)
//! - `BoardStore`, the single source of truth for column and task order
//! - The filter/search overlay deriving narrowed views
//! - Sample board generation for offline mode

mod error;
mod filter;
mod resource;
mod sample;
mod store;

pub use error::BoardError;
pub use filter::{filter_board, TaskFilters};
pub use resource::*;
pub use sample::sample_board;
pub use store::{array_move, BoardStore};
