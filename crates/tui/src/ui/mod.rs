//! UI rendering for the picker TUI: components, theme, layout and the runtime loop.

pub mod components;
pub mod main;
pub mod runtime;
pub mod theme;
