//! Date picker trigger and widget wiring.

mod date_picker_component;
mod state;

pub use date_picker_component::DatePickerComponent;
pub use state::SpinnerState;
