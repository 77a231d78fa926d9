//! UI rendering module for the drawer TUI.
//!
//! Provides the main view, components, runtime loop, themes and layout
//! utilities.

pub mod components;
pub mod main_component;
pub mod runtime;
pub mod theme;
pub mod utils;
