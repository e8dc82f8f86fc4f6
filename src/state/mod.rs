//! Application state management module.
//!
//! This module contains the core state management for the application,
//! including:
//! - Main `State` struct that holds the board stores and drag machinery
//! - Navigation types (View, board selection)
//! - Form editing types for the create-task and create-column modals

mod form;
mod navigation;

pub use form::FormField;
pub use navigation::View;

// State struct, methods and constructor are in state_impl.rs
#[path = "state_impl.rs"]
mod state_impl;

pub use state_impl::State;
