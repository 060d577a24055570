//! UI components: the date picker and the component trait.

pub mod component;
pub mod date_picker;

pub use component::*;
pub use date_picker::DatePickerComponent;
