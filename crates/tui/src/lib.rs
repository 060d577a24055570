//! # Datepick TUI
//!
//! Terminal front end for the date picker control. A trigger line shows the
//! current value or placeholder; opening it shows a spinner standing in for
//! the platform widget, either inline or inside an animated modal with
//! Cancel/Confirm buttons.
//!
//! ## Architecture
//!
//! Components translate keys into effects, `App` applies them to the
//! `DatePicker` controller and mirrors its presentation effects, and the
//! runtime owns the terminal and the tick loop.

mod app;
mod ui;

use anyhow::Result;
use datepick_types::{PickerConfig, Selection};

/// Runs the picker until the user commits a value or quits.
///
/// # Returns
///
/// The committed selection, or `None` when the user left without one.
///
/// # Errors
///
/// Terminal setup or teardown failures.
pub async fn run(config: PickerConfig) -> Result<Option<Selection>> {
    ui::runtime::run_app(config).await
}
