//! UI rendering module for the TUI application.
//!
//! This module provides the main layout, components, theming and the
//! terminal runtime.

pub mod components;
pub mod main_component;
pub mod runtime;
pub mod theme;
